// messaging-api-common/src/error.rs
use crate::http::{HttpError, RawResponse};
use thiserror::Error;

/// Which way an operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any request was sent
    InvalidArgument,
    /// The backend processed the request and reported a failure code
    BackendRejection,
    /// The exchange failed at the network/HTTP layer
    TransportFailure,
}

/// Error returned by every client operation
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{message}")]
    BackendRejection {
        message: String,
        code: String,
        description: String,
        response: Box<RawResponse>,
    },

    #[error("{message}")]
    TransportFailure {
        message: String,
        #[source]
        source: HttpError,
    },
}

pub type OperationResult<T> = Result<T, OperationError>;

impl OperationError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Backend rejection formatted as `"<namespace> - <code> <description>"`
    pub fn backend_rejection(
        namespace: &str,
        code: impl Into<String>,
        description: impl Into<String>,
        response: RawResponse,
    ) -> Self {
        let code = code.into();
        let description = description.into();
        Self::BackendRejection {
            message: format!("{} - {} {}", namespace, code, description),
            code,
            description,
            response: Box::new(response),
        }
    }

    /// Transport failure whose message is the transport's own
    pub fn transport(source: HttpError) -> Self {
        Self::TransportFailure {
            message: source.message.clone(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::BackendRejection { .. } => ErrorKind::BackendRejection,
            Self::TransportFailure { .. } => ErrorKind::TransportFailure,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgument(message) => message,
            Self::BackendRejection { message, .. } => message,
            Self::TransportFailure { message, .. } => message,
        }
    }

    /// Backend error code, for backend rejections
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::BackendRejection { code, .. } => Some(code),
            _ => None,
        }
    }

    /// The response behind this error, if the server answered at all
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::BackendRejection { response, .. } => Some(&**response),
            Self::TransportFailure { source, .. } => source.response.as_deref(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }

    pub fn is_backend_rejection(&self) -> bool {
        self.kind() == ErrorKind::BackendRejection
    }

    pub fn is_transport_failure(&self) -> bool {
        self.kind() == ErrorKind::TransportFailure
    }
}
