/// Failures surfaced by the inventory API gateway
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Login or registration rejected; carries the server's message
    #[error("{0}")]
    Auth(String),

    /// Any 401 outside the auth endpoints; the session must be torn down
    #[error("Unauthorized")]
    Unauthorized,

    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("invalid header: {0}")]
    InvalidHeader(String),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}
