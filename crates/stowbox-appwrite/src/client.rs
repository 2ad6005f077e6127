use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{AppwriteConfig, AppwriteError};

/// Async client for the backend REST API.
///
/// A client built with [`AppwriteClient::new`] authenticates with the
/// server API key; [`AppwriteClient::with_session`] derives a client scoped
/// to a user session instead. Cloning is cheap; the underlying HTTP client
/// is shared.
#[derive(Debug, Clone)]
pub struct AppwriteClient {
    pub(crate) config: AppwriteConfig,
    pub(crate) client: Client,
    pub(crate) session: Option<String>,
}

impl AppwriteClient {
    pub fn new(mut config: AppwriteConfig) -> Self {
        config.endpoint = config.endpoint.trim_end_matches('/').to_string();
        Self {
            config,
            client: Client::new(),
            session: None,
        }
    }

    /// A client carrying a session secret instead of the API key.
    pub fn with_session(&self, secret: &str) -> Self {
        Self {
            config: self.config.clone(),
            client: self.client.clone(),
            session: Some(secret.to_string()),
        }
    }

    pub fn config(&self) -> &AppwriteConfig {
        &self.config
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.endpoint)
    }

    pub(crate) fn with_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("X-Appwrite-Project", &self.config.project_id);
        match &self.session {
            Some(secret) => builder.header("X-Appwrite-Session", secret),
            None => builder.header("X-Appwrite-Key", &self.config.api_key),
        }
    }

    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, AppwriteError> {
        self.with_headers(builder)
            .send()
            .await
            .map_err(|e| AppwriteError::Network(e.to_string()))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, AppwriteError> {
        let resp = self.send(self.client.get(self.url(path))).await?;
        handle_response(resp).await
    }

    pub(crate) async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppwriteError> {
        let resp = self.send(self.client.post(self.url(path)).json(body)).await?;
        handle_response(resp).await
    }

    pub(crate) async fn patch_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppwriteError> {
        let resp = self
            .send(self.client.patch(self.url(path)).json(body))
            .await?;
        handle_response(resp).await
    }

    pub(crate) async fn delete_req(&self, path: &str) -> Result<(), AppwriteError> {
        let resp = self.send(self.client.delete(self.url(path))).await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(parse_error(resp).await)
        }
    }
}

pub(crate) async fn handle_response<T: DeserializeOwned>(
    resp: Response,
) -> Result<T, AppwriteError> {
    let status = resp.status();
    if status.is_success() {
        resp.json()
            .await
            .map_err(|e| AppwriteError::Network(format!("decode body: {e}")))
    } else {
        Err(parse_error_with_status(status, resp).await)
    }
}

pub(crate) async fn parse_error(resp: Response) -> AppwriteError {
    let status = resp.status();
    parse_error_with_status(status, resp).await
}

async fn parse_error_with_status(status: StatusCode, resp: Response) -> AppwriteError {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    let message = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    AppwriteError::Api {
        status: status.as_u16(),
        message,
    }
}
