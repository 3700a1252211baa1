use reqwest::StatusCode;

/// What went wrong while talking to the API, independent of which operation
/// was running.
#[derive(thiserror::Error, Debug)]
pub enum ErrorKind {
    #[error("URL build error: {0}")]
    UrlConstruction(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Request(#[from] RequestFailure),
    #[error("invalid http status: {status}")]
    UnexpectedStatus { status: StatusCode },
    #[error("could not encode request body: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error("could not decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum RequestFailure {
    /// DNS, connect, TLS, timeout or body read failures.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("cancelled by caller")]
    Cancelled,
}

/// Error returned by every client operation. Carries the operation name so a
/// failure can be traced back to the call that produced it.
#[derive(thiserror::Error, Debug)]
#[error("{operation}: {kind}")]
pub struct Error {
    operation: &'static str,
    #[source]
    kind: ErrorKind,
}

impl Error {
    pub fn new(operation: &'static str, kind: ErrorKind) -> Self {
        Self { operation, kind }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// The HTTP status for `UnexpectedStatus` failures.
    pub fn status(&self) -> Option<StatusCode> {
        match &self.kind {
            ErrorKind::UnexpectedStatus { status } => Some(*status),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, ErrorKind::Request(RequestFailure::Cancelled))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
