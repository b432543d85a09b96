use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no search node available (tried {0})")]
    NoNodeAvailable(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("engine returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status reported by the engine, if the failure was an error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
