use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl AppwriteError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppwriteError::Api { status: 404, .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppwriteError::Api { status: 401, .. })
    }
}
