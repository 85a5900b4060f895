/// Core error type for the homework status bot.
///
/// Adapter crates map their specific errors into this type so the poll loop
/// can classify every failure the same way (fatal at startup vs reported and retried).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing required environment variables: {}", missing.join(", "))]
    Credential { missing: Vec<String> },

    #[error("config error: {0}")]
    Config(String),

    #[error("status API request failed: {0}")]
    Transport(String),

    #[error("status API returned {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response format: {0}")]
    Format(String),

    #[error("unexpected response shape: {0}")]
    Shape(String),

    #[error("unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("failed to send message: {0}")]
    Notify(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification; `Credential` is the only kind that stops the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Credential,
    Transport,
    Format,
    Shape,
    UnknownStatus,
    Notify,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            // Only raised during startup.
            Error::Credential { .. } | Error::Config(_) | Error::Io(_) => ErrorKind::Credential,
            Error::Transport(_) | Error::HttpStatus { .. } | Error::Json(_) => ErrorKind::Transport,
            Error::Format(_) => ErrorKind::Format,
            Error::Shape(_) => ErrorKind::Shape,
            Error::UnknownStatus(_) => ErrorKind::UnknownStatus,
            Error::Notify(_) => ErrorKind::Notify,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
