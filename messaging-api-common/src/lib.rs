// messaging-api-common/src/lib.rs
pub mod error;
pub mod file_data;
pub mod http;
pub mod validate;

pub use error::{ErrorKind, OperationError, OperationResult};
pub use file_data::FileData;
pub use http::{
    Exchange, HttpClient, HttpError, HttpRequest, MultipartForm, RawResponse, RequestBody,
    RequestInfo,
};
pub use validate::{code_to_string, validate, BackendFailure, Convention, PayloadLocation};

// Re-export reqwest client when feature is enabled
#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
