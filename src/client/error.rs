use std::error::Error as StdError;
use std::fmt;

use crate::domain::ValidationError;

/// A request to SMS.ir did not succeed.
///
/// Transport failures (DNS, refused connection, timeout) carry no status code;
/// rejections by the service carry the HTTP status they were answered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    message: String,
    status_code: Option<u16>,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status_code,
        }
    }

    /// The exchange could not be completed.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(message, None)
    }

    /// The exchange completed with a non-success HTTP status.
    pub fn rejected(status_code: u16, message: impl Into<String>) -> Self {
        Self::new(message, Some(status_code))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "APIError {code}: {}", self.message),
            None => write!(f, "APIError: {}", self.message),
        }
    }
}

impl StdError for ApiError {}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsIrClient`](super::SmsIrClient).
///
/// Everything that reached the network surfaces as [`SmsIrError::Api`]; the other
/// variants are raised before any request is sent.
pub enum SmsIrError {
    /// The request was sent and failed (transport failure or non-2xx status).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// An input value did not satisfy its invariants.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The request body could not be encoded as JSON.
    #[error("encode error: {0}")]
    Encode(#[source] Box<dyn StdError + Send + Sync>),

    /// The configured base URL is not a valid absolute URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] Box<dyn StdError + Send + Sync>),
}

impl SmsIrError {
    /// HTTP status of a remote rejection, if this error is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(err) => err.status_code(),
            _ => None,
        }
    }

    /// The normalized API failure, if the request reached the network.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}
