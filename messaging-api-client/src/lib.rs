pub mod config;
pub mod line_pay;
pub mod messenger;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::{Config, LinePayConfig, MessengerConfig};
pub use line_pay::LinePay;
pub use messenger::Messenger;

// Re-export the shared error and upload types for convenience
pub use messaging_api_common::{ErrorKind, FileData, OperationError, OperationResult};

use messaging_api_common::HttpRequest;

/// Attach a JSON body; a value that cannot be serialized is the caller's fault
pub(crate) fn with_json<B: serde::Serialize + ?Sized>(
    request: HttpRequest,
    body: &B,
) -> OperationResult<HttpRequest> {
    request
        .json(body)
        .map_err(|e| OperationError::invalid_argument(format!("Cannot serialize request body: {}", e)))
}

/// Check that a caller-supplied id can stand alone as one path segment.
///
/// Graph object ids and LINE Pay transaction ids are alphanumeric.
pub(crate) fn path_segment<'a>(operation: &str, id: &'a str) -> OperationResult<&'a str> {
    let valid = !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if valid {
        Ok(id)
    } else {
        Err(OperationError::invalid_argument(format!(
            "{}: {:?} is not a valid id",
            operation, id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segment_accepts_ids() {
        assert_eq!(path_segment("op", "311549975825185").unwrap(), "311549975825185");
        assert_eq!(path_segment("op", "me").unwrap(), "me");
        assert_eq!(path_segment("op", "APP_ID").unwrap(), "APP_ID");
    }

    #[test]
    fn test_path_segment_rejects_paths_and_urls() {
        for id in ["", "..", "1/insights", "1?fields=x", "https://evil.test/steal", "a b"] {
            let err = path_segment("get_persona", id).unwrap_err();
            assert!(err.is_invalid_argument(), "{:?} was accepted", id);
            assert!(err.message().starts_with("get_persona:"));
        }
    }
}
