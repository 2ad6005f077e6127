use stowbox_appwrite::{AppwriteClient, Query, Session};
use stowbox_core::user::{CreateUserData, UserRecord};
use tracing::error;

use super::ActionError;

/// Placeholder avatar for accounts that have not set one.
pub const AVATAR_PLACEHOLDER_URL: &str =
    "https://img.freepik.com/free-psd/3d-illustration-person-with-sunglasses_23-2149436188.jpg";

/// Look up the user document for an email, if any. One document per email.
pub async fn user_by_email(
    client: &AppwriteClient,
    email: &str,
) -> Result<Option<UserRecord>, ActionError> {
    let collection = client.config().users_collection_id.clone();
    let list = client
        .list_documents::<UserRecord>(&collection, &[Query::equal("email", [email])])
        .await
        .map_err(|e| {
            error!(error = %e, "failed to look up user by email");
            e
        })?;
    Ok(list.documents.into_iter().next())
}

/// Issue an emailed one-time code and return the auth account id.
pub async fn send_email_otp(client: &AppwriteClient, email: &str) -> Result<String, ActionError> {
    let token = client.create_email_token(email).await.map_err(|e| {
        error!(error = %e, "failed to send email OTP");
        e
    })?;
    Ok(token.user_id)
}

/// Sign-up: always sends the OTP; creates the user document only when the
/// email is new, preserving one-record-per-email.
pub async fn create_account(
    client: &AppwriteClient,
    full_name: &str,
    email: &str,
) -> Result<String, ActionError> {
    let existing = user_by_email(client, email).await?;
    let account_id = send_email_otp(client, email).await?;

    if existing.is_none() {
        let collection = client.config().users_collection_id.clone();
        let data = CreateUserData {
            full_name: full_name.to_string(),
            email: email.to_string(),
            avatar: AVATAR_PLACEHOLDER_URL.to_string(),
            account_id: account_id.clone(),
        };
        let _: UserRecord = client
            .create_document(&collection, &data)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to create user document");
                e
            })?;
    }

    Ok(account_id)
}

/// Sign-in: existing users only. An unknown email is a not-found error and
/// no OTP goes out.
pub async fn sign_in(client: &AppwriteClient, email: &str) -> Result<String, ActionError> {
    match user_by_email(client, email).await? {
        Some(user) => {
            send_email_otp(client, email).await?;
            Ok(user.account_id)
        }
        None => Err(ActionError::NotFound(format!("no account for {email}"))),
    }
}

/// Exchange a delivered one-time code for a session.
pub async fn verify_otp(
    client: &AppwriteClient,
    account_id: &str,
    secret: &str,
) -> Result<Session, ActionError> {
    let session = client
        .create_session(account_id, secret)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to verify OTP");
            e
        })?;
    Ok(session)
}

/// Resolve a session secret to the user document behind it.
pub async fn current_user(
    client: &AppwriteClient,
    session_secret: &str,
) -> Result<UserRecord, ActionError> {
    let account = client
        .with_session(session_secret)
        .get_account()
        .await
        .map_err(|e| {
            error!(error = %e, "failed to resolve session account");
            e
        })?;

    let collection = client.config().users_collection_id.clone();
    let list = client
        .list_documents::<UserRecord>(
            &collection,
            &[Query::equal("accountId", [account.id.as_str()])],
        )
        .await
        .map_err(|e| {
            error!(error = %e, "failed to load user record for account");
            e
        })?;

    list.documents
        .into_iter()
        .next()
        .ok_or_else(|| ActionError::NotFound("no user record for account".into()))
}

/// Invalidate the session on the backend.
pub async fn sign_out(client: &AppwriteClient, session_secret: &str) -> Result<(), ActionError> {
    client
        .with_session(session_secret)
        .delete_current_session()
        .await
        .map_err(|e| {
            error!(error = %e, "failed to delete session");
            e
        })?;
    Ok(())
}
