use serde::{Deserialize, Serialize};

/// A user document as the backend stores it in the users collection.
/// One record per email; `account_id` ties it to the auth account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "$id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub avatar: String,
    pub account_id: String,
}

/// Attribute payload for creating a user document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserData {
    pub full_name: String,
    pub email: String,
    pub avatar: String,
    pub account_id: String,
}
