use std::fmt;

/// Failure of a single backend call.
///
/// Every variant is terminal for that one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The endpoint URL could not be built from the base URL.
    InvalidUrl(String),
    /// Connection refused, DNS failure, broken body stream, etc.
    Transport(String),
    /// The request exceeded the configured timeout.
    Timeout(String),
    /// Non-success HTTP status.
    Status { status: u16, body: String },
    /// The body did not decode into the expected response shape.
    UnexpectedFormat(String),
    /// The request was superseded or its screen was closed.
    Cancelled,
}

impl BackendError {
    /// Builds an error from a reqwest failure, keeping the source chain.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        let message = error_chain(err);
        if err.is_timeout() {
            BackendError::Timeout(message)
        } else {
            BackendError::Transport(message)
        }
    }

    /// True for failures reported as "could not reach the backend".
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            BackendError::InvalidUrl(_)
                | BackendError::Transport(_)
                | BackendError::Timeout(_)
                | BackendError::Status { .. }
        )
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::InvalidUrl(msg) => write!(f, "invalid backend URL: {msg}"),
            BackendError::Transport(msg) => write!(f, "{msg}"),
            BackendError::Timeout(msg) => write!(f, "request timed out: {msg}"),
            BackendError::Status { status, body } if body.is_empty() => {
                write!(f, "HTTP {status}")
            }
            BackendError::Status { status, body } => write!(f, "HTTP {status}: {body}"),
            BackendError::UnexpectedFormat(detail) => {
                write!(f, "unexpected response format: {detail}")
            }
            BackendError::Cancelled => write!(f, "request cancelled"),
        }
    }
}

impl std::error::Error for BackendError {}

/// Joins an error and its sources into one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}
