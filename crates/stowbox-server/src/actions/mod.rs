pub mod file;
pub mod user;

use stowbox_appwrite::AppwriteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not authorized: {0}")]
    Unauthorized(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AppwriteError> for ActionError {
    fn from(e: AppwriteError) -> Self {
        if e.is_not_found() {
            ActionError::NotFound(e.to_string())
        } else if e.is_unauthorized() {
            ActionError::Unauthorized(e.to_string())
        } else {
            ActionError::Internal(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_statuses_map_to_action_variants() {
        let e: ActionError = AppwriteError::Api {
            status: 404,
            message: "Document not found".into(),
        }
        .into();
        assert!(matches!(e, ActionError::NotFound(_)));

        let e: ActionError = AppwriteError::Api {
            status: 401,
            message: "Invalid session".into(),
        }
        .into();
        assert!(matches!(e, ActionError::Unauthorized(_)));

        let e: ActionError = AppwriteError::Network("timeout".into()).into();
        assert!(matches!(e, ActionError::Internal(_)));
    }
}
