use serde::Deserialize;
use serde_json::json;

use crate::{AppwriteClient, AppwriteError, UNIQUE_ID};

/// Result of requesting an emailed one-time code. The code itself travels
/// by email; only the account id comes back here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailToken {
    #[serde(rename = "$id")]
    pub id: String,
    pub user_id: String,
    pub expire: String,
}

/// An authenticated session minted from a verified one-time code.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    pub user_id: String,
    /// Only present in the creation response; carried by the caller from
    /// then on.
    #[serde(default)]
    pub secret: String,
}

/// The auth account behind a session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "$id")]
    pub id: String,
    pub email: String,
    pub name: String,
}

impl AppwriteClient {
    /// Issue an emailed one-time code, creating the auth account on first
    /// contact. Returns the token envelope with the account id.
    pub async fn create_email_token(&self, email: &str) -> Result<EmailToken, AppwriteError> {
        self.post_json(
            "/account/tokens/email",
            &json!({ "userId": UNIQUE_ID, "email": email }),
        )
        .await
    }

    /// Exchange a delivered one-time code for a session.
    pub async fn create_session(
        &self,
        account_id: &str,
        secret: &str,
    ) -> Result<Session, AppwriteError> {
        self.post_json(
            "/account/sessions/token",
            &json!({ "userId": account_id, "secret": secret }),
        )
        .await
    }

    /// The account behind this client's session. Session-scoped clients only.
    pub async fn get_account(&self) -> Result<Account, AppwriteError> {
        self.get_json("/account").await
    }

    /// Invalidate this client's session on the backend.
    pub async fn delete_current_session(&self) -> Result<(), AppwriteError> {
        self.delete_req("/account/sessions/current").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_token_deserializes() {
        let json = r#"{
            "$id": "token-1",
            "userId": "acct-9",
            "expire": "2025-03-01T10:15:00.000+00:00"
        }"#;
        let token: EmailToken = serde_json::from_str(json).unwrap();
        assert_eq!(token.id, "token-1");
        assert_eq!(token.user_id, "acct-9");
    }

    #[test]
    fn session_secret_defaults_when_absent() {
        // Reads of an existing session omit the secret.
        let json = r#"{ "$id": "sess-1", "userId": "acct-9" }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.secret, "");

        let json = r#"{ "$id": "sess-1", "userId": "acct-9", "secret": "s3cret" }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.secret, "s3cret");
    }

    #[test]
    fn account_deserializes() {
        let json = r#"{ "$id": "acct-9", "email": "ada@example.com", "name": "Ada" }"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.id, "acct-9");
        assert_eq!(account.email, "ada@example.com");
    }
}
