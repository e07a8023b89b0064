//! Custom Types API client: the concrete `ModelRepository` used by the CLI.
//!
//! Every request carries the repository name, the `sm-api` user agent and the bearer token
//! of the current run. Non-success statuses are reported as transport errors together with
//! the response body.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use slice_sync_core::contract::{AuthToken, CustomType, ModelRepository, SharedSlice};
use slice_sync_core::diff::BulkTransaction;
use slice_sync_core::error::SyncError;

pub const SM_USER_AGENT: &str = "sm-api";
pub const REPOSITORY_HEADER: &str = "repository";

pub struct CustomTypesClient {
    client: reqwest::Client,
    base_url: String,
    repository: String,
}

impl CustomTypesClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            repository: repository.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorised(&self, builder: RequestBuilder, token: &AuthToken) -> RequestBuilder {
        builder
            .header(REPOSITORY_HEADER, &self.repository)
            .header(USER_AGENT, SM_USER_AGENT)
            .header(AUTHORIZATION, format!("Bearer {}", token.as_str()))
    }

    async fn send(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> Result<Response, SyncError> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!(error = ?e, operation, "Request failed");
            SyncError::transport(operation, e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(error = ?e, operation, "Failed to read error response body");
                String::new()
            }
        };
        tracing::error!(operation, %status, body = %body, "Custom Types API returned an error");
        Err(SyncError::transport(
            operation,
            format!("status {status}: {body}"),
        ))
    }

    async fn list<T>(
        &self,
        operation: &'static str,
        path: &str,
        token: &AuthToken,
    ) -> Result<Vec<T>, SyncError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::info!(repository = %self.repository, url = %url, operation, "Listing remote models");
        let request = self.authorised(self.client.get(&url), token);
        let models: Vec<T> = self
            .send(operation, request)
            .await?
            .json()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, operation, "Failed to decode list response");
                SyncError::transport(operation, e)
            })?;
        tracing::info!(operation, count = models.len(), "Listed remote models");
        Ok(models)
    }
}

#[async_trait]
impl ModelRepository for CustomTypesClient {
    async fn list_custom_types(&self, token: &AuthToken) -> Result<Vec<CustomType>, SyncError> {
        self.list("list custom types", "customtypes", token).await
    }

    async fn list_shared_slices(
        &self,
        token: &AuthToken,
    ) -> Result<Vec<SharedSlice>, SyncError> {
        self.list("list shared slices", "slices", token).await
    }

    async fn apply_bulk(
        &self,
        token: &AuthToken,
        transaction: &BulkTransaction,
    ) -> Result<(), SyncError> {
        let url = self.url("bulk");
        tracing::info!(
            repository = %self.repository,
            changes = transaction.len(),
            "Submitting bulk transaction"
        );
        let request = self.authorised(self.client.post(&url), token).json(transaction);
        self.send("bulk", request).await?;
        tracing::info!(changes = transaction.len(), "Bulk transaction accepted");
        Ok(())
    }
}
