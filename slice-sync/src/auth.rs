//! Login against the Prismic auth endpoint.

use async_trait::async_trait;
use serde::Serialize;
use slice_sync_core::contract::{AuthToken, Authenticator};
use slice_sync_core::error::SyncError;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Exchanges an email/password pair for a bearer token with one `POST`.
pub struct PrismicAuthenticator {
    client: reqwest::Client,
    login_url: String,
}

impl PrismicAuthenticator {
    pub fn new(client: reqwest::Client, login_url: impl Into<String>) -> Self {
        Self {
            client,
            login_url: login_url.into(),
        }
    }
}

#[async_trait]
impl Authenticator for PrismicAuthenticator {
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, SyncError> {
        tracing::info!(url = %self.login_url, "Logging in");

        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(&self.login_url)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, url = %self.login_url, "Login request failed");
                SyncError::transport("login", e)
            })?;

        let status = response.status();
        let response = response.error_for_status().map_err(|e| {
            tracing::error!(%status, url = %self.login_url, "Login rejected");
            SyncError::transport("login", e)
        })?;

        // The body is the token, verbatim.
        let token = response
            .text()
            .await
            .map_err(|e| SyncError::transport("login", e))?;
        tracing::info!(token_len = token.len(), "Login succeeded");
        Ok(AuthToken::new(token))
    }
}
