// messaging-api-common/src/validate.rs
//! Classification of completed exchanges into payloads or [`OperationError`]s.
//!
//! Backends differ in how they report failure: LINE Pay answers `200 OK` with a
//! non-`"0000"` `returnCode`, the Graph API answers non-2xx with an `error`
//! object. A [`Convention`] captures those rules so every endpoint method goes
//! through the same [`validate`] and produces the same error shape.

use crate::error::{OperationError, OperationResult};
use crate::http::{Exchange, HttpError, RawResponse};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Backend-reported failure details pulled out of an envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFailure {
    pub code: String,
    pub description: String,
}

impl BackendFailure {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }

    fn unknown() -> Self {
        Self::new("unknown", "")
    }
}

/// Where the payload lives inside a successful envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadLocation {
    /// A named top-level field, e.g. LINE Pay's `info`
    Field(&'static str),
    /// The whole body is the payload
    Body,
}

impl PayloadLocation {
    fn take(self, body: Value) -> Option<Value> {
        let payload = match self {
            Self::Body => body,
            Self::Field(name) => match body {
                Value::Object(mut map) => map.remove(name)?,
                _ => return None,
            },
        };
        (!payload.is_null()).then_some(payload)
    }
}

/// Success and failure rules of one backend
#[derive(Clone, Copy)]
pub struct Convention {
    /// Prefix of backend rejection messages, e.g. `"LINE PAY API"`
    pub namespace: &'static str,
    pub is_success: fn(&Value) -> bool,
    /// Extract code and description from a failure envelope, if it is one
    pub describe_failure: fn(&Value) -> Option<BackendFailure>,
    pub payload: PayloadLocation,
}

impl std::fmt::Debug for Convention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Convention")
            .field("namespace", &self.namespace)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

impl Convention {
    /// Validate and return the raw payload
    pub fn validate(&self, exchange: &Exchange) -> OperationResult<Option<Value>> {
        validate(exchange, self)
    }

    /// Validate and deserialize the payload. An absent payload is `Ok(None)`.
    pub fn extract<T: DeserializeOwned>(&self, exchange: &Exchange) -> OperationResult<Option<T>> {
        let Some(payload) = self.validate(exchange)? else {
            return Ok(None);
        };
        serde_json::from_value(payload)
            .map(Some)
            .map_err(|e| malformed_body(exchange, e.to_string()))
    }

    /// Like [`Convention::extract`], for operations that always answer with data
    pub fn extract_required<T: DeserializeOwned>(&self, exchange: &Exchange) -> OperationResult<T> {
        self.extract(exchange)?
            .ok_or_else(|| malformed_body(exchange, "response has no payload".to_string()))
    }

    fn reject(&self, failure: BackendFailure, response: &RawResponse) -> OperationError {
        OperationError::backend_rejection(
            self.namespace,
            failure.code,
            failure.description,
            response.clone(),
        )
    }

    fn reject_transport(&self, err: &HttpError) -> OperationError {
        // A non-2xx answer may still carry the backend's own error envelope
        let failure = err
            .response
            .as_deref()
            .and_then(|response| parse_body(response).ok().map(|body| (response, body)))
            .and_then(|(response, body)| {
                (self.describe_failure)(&body).map(|failure| (response, failure))
            });

        match failure {
            Some((response, failure)) => self.reject(failure, response),
            None => OperationError::transport(err.clone()),
        }
    }
}

/// Classify a completed exchange.
///
/// Returns the payload when the convention's success predicate holds, a
/// `BackendRejection` when the backend reported failure, and a
/// `TransportFailure` when no usable response was received. Takes the exchange
/// by reference and has no side effects, so repeated calls agree.
pub fn validate(exchange: &Exchange, convention: &Convention) -> OperationResult<Option<Value>> {
    let response = match exchange {
        Ok(response) => response,
        Err(err) => return Err(convention.reject_transport(err)),
    };

    let body = parse_body(response).map_err(|e| malformed_body(exchange, e.to_string()))?;

    if !(convention.is_success)(&body) {
        let failure = (convention.describe_failure)(&body).unwrap_or_else(BackendFailure::unknown);
        return Err(convention.reject(failure, response));
    }

    Ok(convention.payload.take(body))
}

/// Render a JSON code (string or number) as text
pub fn code_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_body(response: &RawResponse) -> Result<Value, serde_json::Error> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&response.body)
}

fn malformed_body(exchange: &Exchange, reason: String) -> OperationError {
    let response = exchange.as_ref().ok();
    OperationError::transport(HttpError {
        status: response.map(|r| r.status),
        message: format!("Invalid response body: {}", reason),
        response: response.map(|r| Box::new(r.clone())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::http::RequestInfo;
    use http::Method;
    use serde::Deserialize;
    use serde_json::json;

    fn status_code_success(body: &Value) -> bool {
        body.get("statusCode").and_then(Value::as_str) == Some("0000")
    }

    fn status_code_failure(body: &Value) -> Option<BackendFailure> {
        let code = code_to_string(body.get("statusCode")?)?;
        let message = body
            .get("statusMessage")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Some(BackendFailure::new(code, message))
    }

    const STATUS_CODE: Convention = Convention {
        namespace: "TEST API",
        is_success: status_code_success,
        describe_failure: status_code_failure,
        payload: PayloadLocation::Field("info"),
    };

    fn response(status: u16, body: Value) -> RawResponse {
        raw(status, serde_json::to_vec(&body).unwrap())
    }

    fn raw(status: u16, body: Vec<u8>) -> RawResponse {
        RawResponse {
            status,
            headers: Vec::new(),
            body,
            request: RequestInfo {
                method: Method::GET,
                url: "https://example.test/v2/payments".to_string(),
            },
        }
    }

    #[test]
    fn test_success_returns_payload() {
        let exchange: Exchange = Ok(response(
            200,
            json!({"statusCode": "0000", "statusMessage": "OK", "info": {"transactionId": "T1"}}),
        ));
        let payload = validate(&exchange, &STATUS_CODE).unwrap();
        assert_eq!(payload, Some(json!({"transactionId": "T1"})));
    }

    #[test]
    fn test_success_without_payload_is_none() {
        let exchange: Exchange = Ok(response(200, json!({"statusCode": "0000", "statusMessage": "OK"})));
        assert_eq!(validate(&exchange, &STATUS_CODE).unwrap(), None);

        let exchange: Exchange = Ok(response(
            200,
            json!({"statusCode": "0000", "statusMessage": "OK", "info": null}),
        ));
        assert_eq!(validate(&exchange, &STATUS_CODE).unwrap(), None);
    }

    #[test]
    fn test_failure_code_becomes_backend_rejection() {
        let exchange: Exchange = Ok(response(
            200,
            json!({"statusCode": "1104", "statusMessage": "Invalid amount"}),
        ));
        let err = validate(&exchange, &STATUS_CODE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BackendRejection);
        assert!(err.message().contains("1104"));
        assert!(err.message().contains("Invalid amount"));
        assert_eq!(err.message(), "TEST API - 1104 Invalid amount");
        assert_eq!(err.response().unwrap().status, 200);
    }

    #[test]
    fn test_failure_without_details_uses_unknown_code() {
        let exchange: Exchange = Ok(response(200, json!({"unexpected": true})));
        let err = validate(&exchange, &STATUS_CODE).unwrap_err();
        assert_eq!(err.code(), Some("unknown"));
    }

    #[test]
    fn test_network_error_is_transport_failure() {
        let exchange: Exchange = Err(HttpError::network("getaddrinfo ENOTFOUND api-pay.line.me"));
        let err = validate(&exchange, &STATUS_CODE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
        assert_eq!(err.message(), "getaddrinfo ENOTFOUND api-pay.line.me");
        assert!(err.response().is_none());
    }

    #[test]
    fn test_non_2xx_with_envelope_is_backend_rejection() {
        let exchange: Exchange = Err(HttpError::status(response(
            400,
            json!({"statusCode": "2101", "statusMessage": "Parameter error"}),
        )));
        let err = validate(&exchange, &STATUS_CODE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BackendRejection);
        assert_eq!(err.message(), "TEST API - 2101 Parameter error");
        assert_eq!(err.response().unwrap().status, 400);
    }

    #[test]
    fn test_non_2xx_without_envelope_is_transport_failure() {
        let exchange: Exchange = Err(HttpError::status(raw(502, b"<html>Bad Gateway</html>".to_vec())));
        let err = validate(&exchange, &STATUS_CODE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
        assert_eq!(err.message(), "Request failed with status code 502");
        assert_eq!(err.response().unwrap().status, 502);
    }

    #[test]
    fn test_malformed_body_is_transport_failure() {
        let exchange: Exchange = Ok(raw(200, b"not json".to_vec()));
        let err = validate(&exchange, &STATUS_CODE).unwrap_err();
        assert!(err.is_transport_failure());
        assert!(err.message().starts_with("Invalid response body"));
        assert!(err.response().is_some());
    }

    #[test]
    fn test_validate_is_repeatable() {
        let ok: Exchange = Ok(response(
            200,
            json!({"statusCode": "0000", "statusMessage": "OK", "info": [1, 2]}),
        ));
        assert_eq!(
            validate(&ok, &STATUS_CODE).unwrap(),
            validate(&ok, &STATUS_CODE).unwrap()
        );

        let failed: Exchange = Ok(response(200, json!({"statusCode": "9000", "statusMessage": "Internal"})));
        let first = validate(&failed, &STATUS_CODE).unwrap_err();
        let second = validate(&failed, &STATUS_CODE).unwrap_err();
        assert_eq!(first.message(), second.message());
        assert_eq!(first.kind(), second.kind());
    }

    #[test]
    fn test_body_location_returns_whole_body() {
        let convention = Convention {
            payload: PayloadLocation::Body,
            is_success: |body| body.get("error").is_none(),
            ..STATUS_CODE
        };
        let exchange: Exchange = Ok(response(200, json!({"recipient_id": "1", "message_id": "m"})));
        assert_eq!(
            convention.validate(&exchange).unwrap(),
            Some(json!({"recipient_id": "1", "message_id": "m"}))
        );

        let empty: Exchange = Ok(raw(200, Vec::new()));
        assert_eq!(convention.validate(&empty).unwrap(), None);
    }

    #[derive(Debug, Deserialize)]
    struct Info {
        #[serde(rename = "transactionId")]
        transaction_id: String,
    }

    #[test]
    fn test_extract_typed_payload() {
        let exchange: Exchange = Ok(response(
            200,
            json!({"statusCode": "0000", "statusMessage": "OK", "info": {"transactionId": "T1"}}),
        ));
        let info: Info = STATUS_CODE.extract_required(&exchange).unwrap();
        assert_eq!(info.transaction_id, "T1");
    }

    #[test]
    fn test_extract_wrong_shape_is_transport_failure() {
        let exchange: Exchange = Ok(response(
            200,
            json!({"statusCode": "0000", "statusMessage": "OK", "info": {"other": 1}}),
        ));
        let err = STATUS_CODE.extract::<Info>(&exchange).unwrap_err();
        assert!(err.is_transport_failure());
    }

    #[test]
    fn test_extract_required_missing_payload() {
        let exchange: Exchange = Ok(response(200, json!({"statusCode": "0000", "statusMessage": "OK"})));
        assert!(STATUS_CODE.extract::<Info>(&exchange).unwrap().is_none());
        let err = STATUS_CODE.extract_required::<Info>(&exchange).unwrap_err();
        assert!(err.is_transport_failure());
    }

    #[test]
    fn test_code_to_string() {
        assert_eq!(code_to_string(&json!("0000")), Some("0000".to_string()));
        assert_eq!(code_to_string(&json!(190)), Some("190".to_string()));
        assert_eq!(code_to_string(&json!(null)), None);
    }
}
