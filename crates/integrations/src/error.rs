use thiserror::Error;

/// Failure talking to an external collaborator.
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// The request never produced a usable HTTP response.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered, but not with success.
    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The upstream answered with a body we could not interpret.
    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),
}

impl IntegrationError {
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}
