use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The error type for ramsign operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    service: Option<Box<ServiceError>>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request cannot be built or signed (invalid uri, header, body, etc.)
    RequestInvalid,

    /// Configuration error (missing credential, invalid endpoint)
    ConfigInvalid,

    /// Network-level failure: DNS, connection refused, timeout, broken body.
    Transport,

    /// The service answered 500 or 503.
    ServiceUnavailable,

    /// The service rejected the request with any other non-success status.
    Service,

    /// A success response whose body could not be decoded.
    Decode,

    /// Unexpected errors
    Unexpected,
}

impl ErrorKind {
    /// Check if an error of this kind may succeed when sent again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Transport | ErrorKind::ServiceUnavailable)
    }
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            service: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if sending the same request again may succeed.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// The decoded error body, present for [`ErrorKind::Service`] and
    /// [`ErrorKind::ServiceUnavailable`].
    pub fn service_error(&self) -> Option<&ServiceError> {
        self.service.as_deref()
    }

    /// Shortcut for the service error code, e.g. `EntityNotExist.Role`.
    pub fn code(&self) -> Option<&str> {
        self.service_error().map(|e| e.code.as_str())
    }

    /// HTTP status carried by the service error, if any.
    pub fn http_status(&self) -> Option<u16> {
        self.service_error().map(|e| e.http_status)
    }
}

// Convenience constructors
impl Error {
    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    /// Wrap a service error whose status means the server is overloaded or unavailable.
    pub fn service_unavailable(err: ServiceError) -> Self {
        Self::with_service(ErrorKind::ServiceUnavailable, err)
    }

    /// Wrap a service error that must not be retried.
    pub fn service(err: ServiceError) -> Self {
        Self::with_service(ErrorKind::Service, err)
    }

    fn with_service(kind: ErrorKind, err: ServiceError) -> Self {
        Self {
            kind,
            message: err.to_string(),
            service: Some(Box::new(err)),
            source: None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::ServiceUnavailable => write!(f, "service unavailable"),
            ErrorKind::Service => write!(f, "service error"),
            ErrorKind::Decode => write!(f, "decode error"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

/// ServiceError is the body returned by the service on a non-success status.
///
/// Every field is optional on the wire; missing fields decode to their
/// default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceError {
    /// HTTP status of the response.
    #[serde(rename = "HttpStatus")]
    pub http_status: u16,
    /// Request id assigned by the service.
    #[serde(rename = "RequestId")]
    pub request_id: String,
    /// Host that served the request.
    #[serde(rename = "HostId")]
    pub host_id: String,
    /// Machine readable error code, e.g. `EntityNotExist.Role`.
    #[serde(rename = "Code")]
    pub code: String,
    /// Human readable message.
    #[serde(rename = "Message")]
    pub message: String,
}

impl ServiceError {
    /// The entity addressed by the request doesn't exist.
    pub fn is_entity_not_exist(&self) -> bool {
        self.code.starts_with("EntityNotExist")
    }

    /// The entity to create is already there.
    pub fn is_entity_already_exists(&self) -> bool {
        self.code.starts_with("EntityAlreadyExists")
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "service responded {} with code {:?}: {}",
            self.http_status, self.code, self.message
        )?;
        if !self.request_id.is_empty() {
            write!(f, " (request id: {})", self.request_id)?;
        }
        Ok(())
    }
}

// Common From implementations
impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::config_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
