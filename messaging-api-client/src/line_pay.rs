// messaging-api-client/src/line_pay.rs
use crate::config::LinePayConfig;
use crate::types::line_pay::{
    AuthorizationDetail, ConfirmInfo, ConfirmRequest, PaymentDetail, PaymentLookup, RefundInfo,
    RefundOptions, ReserveInfo, ReserveRequest, TransactionId,
};
use crate::{path_segment, with_json};
use messaging_api_common::{
    code_to_string, BackendFailure, Convention, HttpClient, HttpRequest, OperationResult,
    PayloadLocation, ReqwestClient,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{instrument, warn};

const SUCCESS_CODE: &str = "0000";

fn is_success(body: &Value) -> bool {
    body.get("returnCode").and_then(Value::as_str) == Some(SUCCESS_CODE)
}

fn describe_failure(body: &Value) -> Option<BackendFailure> {
    let code = code_to_string(body.get("returnCode")?)?;
    let message = body
        .get("returnMessage")
        .and_then(Value::as_str)
        .unwrap_or_default();
    Some(BackendFailure::new(code, message))
}

/// LINE Pay envelope: `{returnCode, returnMessage, info?}`, success is `"0000"`
pub const LINE_PAY_API: Convention = Convention {
    namespace: "LINE PAY API",
    is_success,
    describe_failure,
    payload: PayloadLocation::Field("info"),
};

/// LINE Pay v2 client
pub struct LinePay<C: HttpClient = ReqwestClient> {
    http: C,
}

impl LinePay<ReqwestClient> {
    pub fn new(config: &LinePayConfig) -> Self {
        let mut http = ReqwestClient::new(config.base_url())
            .with_header("X-LINE-ChannelId", config.channel_id.as_str())
            .with_header("X-LINE-ChannelSecret", config.channel_secret.as_str());
        if let Some(timeout) = config.timeout() {
            http = http.with_timeout(timeout);
        }
        Self { http }
    }
}

impl<C: HttpClient> LinePay<C> {
    /// Use a custom transport, already bound to the LINE Pay base URL and
    /// channel headers
    pub fn with_client(http: C) -> Self {
        Self { http }
    }

    /// Send a request and unwrap the `info` payload
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn call<T: DeserializeOwned>(&self, request: HttpRequest) -> OperationResult<Option<T>> {
        let exchange = self.http.send(request).await;
        let result = LINE_PAY_API.extract(&exchange);
        if let Err(err) = &result {
            warn!(error = %err, "LINE Pay request failed");
        }
        result
    }

    /// Look up payments by transaction id and/or order id
    pub async fn get_payments(&self, lookup: &PaymentLookup) -> OperationResult<Vec<PaymentDetail>> {
        let query = lookup.to_query("get_payments")?;
        let mut request = HttpRequest::get("payments");
        request.query = query;
        Ok(self.call(request).await?.unwrap_or_default())
    }

    /// Look up authorizations by transaction id and/or order id
    pub async fn get_authorizations(
        &self,
        lookup: &PaymentLookup,
    ) -> OperationResult<Vec<AuthorizationDetail>> {
        let query = lookup.to_query("get_authorizations")?;
        let mut request = HttpRequest::get("payments/authorizations");
        request.query = query;
        Ok(self.call(request).await?.unwrap_or_default())
    }

    /// Reserve a payment; the user approves it at `payment_url`
    pub async fn reserve(&self, request: &ReserveRequest) -> OperationResult<Option<ReserveInfo>> {
        self.call(with_json(HttpRequest::post("payments/request"), request)?)
            .await
    }

    /// Complete a reserved payment after the user approved it
    pub async fn confirm(
        &self,
        transaction_id: &TransactionId,
        request: ConfirmRequest,
    ) -> OperationResult<Option<ConfirmInfo>> {
        let id = path_segment("confirm", transaction_id.as_str())?;
        let path = format!("payments/{}/confirm", id);
        self.call(with_json(HttpRequest::post(path), &request)?).await
    }

    /// Capture an authorized payment
    pub async fn capture(
        &self,
        transaction_id: &TransactionId,
        request: ConfirmRequest,
    ) -> OperationResult<Option<ConfirmInfo>> {
        let id = path_segment("capture", transaction_id.as_str())?;
        let path = format!("payments/authorizations/{}/capture", id);
        self.call(with_json(HttpRequest::post(path), &request)?).await
    }

    /// Void an authorized payment
    pub async fn void(&self, transaction_id: &TransactionId) -> OperationResult<()> {
        let id = path_segment("void", transaction_id.as_str())?;
        let path = format!("payments/authorizations/{}/void", id);
        self.call::<Value>(HttpRequest::post(path)).await?;
        Ok(())
    }

    /// Refund a payment, fully unless `refund_amount` is set
    pub async fn refund(
        &self,
        transaction_id: &TransactionId,
        options: RefundOptions,
    ) -> OperationResult<Option<RefundInfo>> {
        let id = path_segment("refund", transaction_id.as_str())?;
        let path = format!("payments/{}/refund", id);
        self.call(with_json(HttpRequest::post(path), &options)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingClient;
    use crate::types::line_pay::Currency;
    use messaging_api_common::{ErrorKind, HttpError, RequestBody};
    use serde_json::json;

    fn client(recording: &RecordingClient) -> LinePay<RecordingClient> {
        LinePay::with_client(recording.clone())
    }

    #[tokio::test]
    async fn test_get_payments_without_identifier_sends_nothing() {
        let recording = RecordingClient::new();
        let err = client(&recording)
            .get_payments(&PaymentLookup::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(recording.request_count(), 0);
    }

    #[tokio::test]
    async fn test_get_authorizations_without_identifier_sends_nothing() {
        let recording = RecordingClient::new();
        let err = client(&recording)
            .get_authorizations(&PaymentLookup::default())
            .await
            .unwrap_err();

        assert!(err.message().starts_with("get_authorizations:"));
        assert_eq!(recording.request_count(), 0);
    }

    #[tokio::test]
    async fn test_get_payments_by_order_id() {
        let recording = RecordingClient::new().respond_json(json!({
            "returnCode": "0000",
            "returnMessage": "OK",
            "info": [{
                "transactionId": 1,
                "transactionDate": "2014-01-01T06:17:41Z",
                "transactionType": "PAYMENT",
                "productName": "Coffee",
                "currency": "JPY",
                "orderId": "order-1"
            }]
        }));
        let payments = client(&recording)
            .get_payments(&PaymentLookup::by_order_id("order-1"))
            .await
            .unwrap();

        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].order_id.as_deref(), Some("order-1"));

        let request = recording.last_request().unwrap();
        assert_eq!(request.path, "payments");
        assert_eq!(request.query_value("orderId"), Some("order-1"));
        assert_eq!(request.query_value("transactionId"), None);
    }

    #[tokio::test]
    async fn test_reserve_returns_info() {
        let recording = RecordingClient::new().respond_json(json!({
            "returnCode": "0000",
            "returnMessage": "OK",
            "info": {
                "transactionId": 2018123112345678910u64,
                "paymentUrl": {"web": "https://web-pay.line.me/x", "app": "line://pay/x"},
                "paymentAccessToken": "187568751124"
            }
        }));
        let request = ReserveRequest::new("Coffee", 1000.0, Currency::JPY, "https://shop.test/confirm", "order-1");
        let info = client(&recording).reserve(&request).await.unwrap().unwrap();

        assert_eq!(info.transaction_id.as_str(), "2018123112345678910");
        assert_eq!(info.payment_access_token, "187568751124");

        let sent = recording.last_request().unwrap();
        assert_eq!(sent.path, "payments/request");
        match sent.body {
            RequestBody::Json(bytes) => {
                let body: Value = serde_json::from_slice(&bytes).unwrap();
                assert_eq!(body["productName"], "Coffee");
                assert_eq!(body["amount"], 1000);
                assert!(body.get("capture").is_none());
            }
            other => panic!("Expected JSON body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_confirm_rejection_carries_code() {
        let recording = RecordingClient::new().respond_json(json!({
            "returnCode": "1104",
            "returnMessage": "Invalid amount"
        }));
        let err = client(&recording)
            .confirm(&TransactionId::from("T1"), ConfirmRequest::new(10.0, Currency::USD))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::BackendRejection);
        assert_eq!(err.message(), "LINE PAY API - 1104 Invalid amount");
        assert_eq!(err.code(), Some("1104"));
        assert_eq!(recording.last_request().unwrap().path, "payments/T1/confirm");
    }

    #[tokio::test]
    async fn test_capture_path() {
        let recording = RecordingClient::new().respond_json(json!({
            "returnCode": "0000",
            "returnMessage": "OK",
            "info": {"orderId": "order-1", "transactionId": 7, "payInfo": [{"method": "CREDIT_CARD", "amount": 10}]}
        }));
        let info = client(&recording)
            .capture(&TransactionId::from(7u64), ConfirmRequest::new(10.0, Currency::THB))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(info.order_id, "order-1");
        assert_eq!(
            recording.last_request().unwrap().path,
            "payments/authorizations/7/capture"
        );
    }

    #[tokio::test]
    async fn test_void_has_no_payload() {
        let recording = RecordingClient::new().respond_json(json!({
            "returnCode": "0000",
            "returnMessage": "OK"
        }));
        client(&recording)
            .void(&TransactionId::from("T9"))
            .await
            .unwrap();

        let sent = recording.last_request().unwrap();
        assert_eq!(sent.path, "payments/authorizations/T9/void");
        assert!(matches!(sent.body, RequestBody::Empty));
    }

    #[tokio::test]
    async fn test_refund_network_error() {
        let recording = RecordingClient::new().respond_err(HttpError::network("socket hang up"));
        let err = client(&recording)
            .refund(&TransactionId::from("T1"), RefundOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TransportFailure);
        assert_eq!(err.message(), "socket hang up");
    }

    #[tokio::test]
    async fn test_transaction_id_must_be_one_segment() {
        let recording = RecordingClient::new();
        let err = client(&recording)
            .void(&TransactionId::from("T1/../../payments/T2"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.message().starts_with("void:"));
        assert_eq!(recording.request_count(), 0);
    }
}
