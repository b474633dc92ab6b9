#[derive(thiserror::Error, Debug)]
pub enum NearstayError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Upstream failure: {0}")]
    Upstream(String),
    /// `body` is kept for logs; the message shows only the status.
    #[error("Upstream returned status {status}")]
    UpstreamStatus { status: u16, body: String },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl NearstayError {
    /// Stable code surfaced to API callers alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            NearstayError::InvalidInput(_) => "INVALID_INPUT",
            NearstayError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            NearstayError::Upstream(_) | NearstayError::UpstreamStatus { .. } => {
                "UPSTREAM_FAILURE"
            }
            NearstayError::Config(_) => "CONFIG",
        }
    }
}

pub type Result<T> = std::result::Result<T, NearstayError>;
