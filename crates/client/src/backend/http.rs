//! HTTP implementation of the authentication backend.

use std::sync::Arc;

use serde::Serialize;
use url::Url;

use crate::config::ClientConfig;
use crate::models::Profile;

use super::{AuthBackend, AuthPayload, BackendError};

/// Reqwest-backed [`AuthBackend`].
///
/// Cheaply cloneable via `Arc`; one instance is constructed at process start
/// from [`ClientConfig`] and shared with the session manager.
#[derive(Clone)]
pub struct HttpAuthBackend {
    inner: Arc<HttpAuthBackendInner>,
}

struct HttpAuthBackendInner {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl HttpAuthBackend {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            inner: Arc::new(HttpAuthBackendInner {
                client: reqwest::Client::new(),
                base_url: config.api_base_url.clone(),
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{path}",
            self.inner.base_url.as_str().trim_end_matches('/')
        )
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        if !response.status().is_success() {
            return Err(BackendError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl AuthBackend for HttpAuthBackend {
    async fn login(&self, username: &str, password: &str) -> Result<AuthPayload, BackendError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("/api/login_check"))
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn register(&self, email: &str, password: &str) -> Result<AuthPayload, BackendError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("/api/register"))
            .json(&RegisterRequest { email, password })
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn fetch_profile(&self, token: &str) -> Result<Profile, BackendError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("/api/profile"))
            .bearer_auth(token)
            .send()
            .await?;

        Self::decode(response).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ClientConfig::new("https://shop.example.com/", true).unwrap();
        let backend = HttpAuthBackend::new(&config);
        assert_eq!(
            backend.endpoint("/api/login_check"),
            "https://shop.example.com/api/login_check"
        );
    }
}
