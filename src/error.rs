use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::transport::HttpResponse;

pub type Result<T> = std::result::Result<T, LoadError>;

/// Why loading an endpoint did not produce a value.
///
/// Exactly one variant describes each failed load. The executor checks them
/// in declaration order: transport, response shape, status, then whatever
/// the endpoint's parse step reports.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    /// The request never produced a response (connect, DNS, timeout, cancel).
    #[error("failed to connect: {0}")]
    Transport(#[source] TransportError),

    /// Something answered, but not with an HTTP response.
    #[error("unexpected response type")]
    UnexpectedResponseType,

    /// The status code was rejected by the endpoint's status predicate.
    ///
    /// The body is never parsed in this case; the raw response is kept for
    /// diagnostics.
    #[error("unexpected status code {code}")]
    UnexpectedStatus {
        code: u16,
        response: Arc<HttpResponse>,
    },

    /// The response carried no body where one was required.
    #[error("response body is missing")]
    MissingBody,

    /// The body was present but could not be turned into the expected value.
    #[error("failed to parse response: {0}")]
    ParseFailure(#[source] ParseError),
}

impl LoadError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LoadError::UnexpectedStatus { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, LoadError::Transport(_))
    }

    pub fn is_parse_failure(&self) -> bool {
        matches!(self, LoadError::ParseFailure(_))
    }
}

impl From<ParseError> for LoadError {
    fn from(e: ParseError) -> Self {
        LoadError::ParseFailure(e)
    }
}

impl From<TransportError> for LoadError {
    fn from(e: TransportError) -> Self {
        LoadError::Transport(e)
    }
}

/// Structural extraction failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("failed to parse selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("no element matches selector '{selector}'")]
    MissingNode { selector: String },

    /// Item `index` (0-based, document order) has no child element.
    #[error("item {index} matched by '{selector}' has no child element")]
    MissingChild { selector: String, index: usize },

    #[error("item {index} is missing attribute '{attribute}'")]
    MissingAttribute { attribute: String, index: usize },

    #[error("{0}")]
    Custom(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::InvalidJson(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Connect,
    Timeout,
    Cancelled,
    InvalidRequest,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransportErrorKind::Connect => "connection failed",
            TransportErrorKind::Timeout => "timed out",
            TransportErrorKind::Cancelled => "cancelled",
            TransportErrorKind::InvalidRequest => "invalid request",
            TransportErrorKind::Other => "transport error",
        };
        f.write_str(s)
    }
}

/// A failure below HTTP: the request did not complete.
#[derive(Debug, Clone)]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
    source: Option<Arc<dyn std::error::Error + Send + Sync + 'static>>,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn timed_out(after: Duration) -> Self {
        Self::new(
            TransportErrorKind::Timeout,
            format!("no response within {}ms", after.as_millis()),
        )
    }

    pub fn cancelled() -> Self {
        Self::new(TransportErrorKind::Cancelled, "request was cancelled")
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/* Display + Error for nicer to_string() */
impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/* Conversions so `?` works smoothly */
impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            TransportErrorKind::Timeout
        } else if e.is_connect() {
            TransportErrorKind::Connect
        } else if e.is_builder() {
            TransportErrorKind::InvalidRequest
        } else {
            TransportErrorKind::Other
        };
        TransportError::new(kind, e.to_string()).with_source(e)
    }
}

impl From<tokio::task::JoinError> for TransportError {
    fn from(e: tokio::task::JoinError) -> Self {
        if e.is_cancelled() {
            TransportError::cancelled()
        } else {
            TransportError::new(TransportErrorKind::Other, format!("load task failed: {e}"))
        }
    }
}
