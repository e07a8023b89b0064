//! # contract: content models and the remote seams of a push run
//!
//! Plain data types for custom types, shared slices and model sets, plus the two
//! traits the pipeline talks to the outside world through:
//! - [`Authenticator`]: exchanges account credentials for an [`AuthToken`].
//! - [`ModelRepository`]: lists remote models and applies a bulk transaction.
//!
//! Both traits are annotated for `mockall` so the orchestrator can be tested without a
//! network. Concrete HTTP implementations live in the `slice-sync` crate.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::diff::BulkTransaction;
use crate::error::SyncError;

/// A custom type document as stored in `customtypes/<id>/index.json`.
///
/// Only `id` is interpreted; every other key is kept verbatim so a document read
/// from disk serializes back to an equal JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomType {
    pub id: String,
    #[serde(flatten)]
    pub definition: Map<String, Value>,
}

/// A shared slice document as stored in `<library>/<Slice>/model.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedSlice {
    pub id: String,
    #[serde(flatten)]
    pub definition: Map<String, Value>,
}

/// One side of a diff: everything known locally, or everything known remotely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelSet {
    pub custom_types: Vec<CustomType>,
    pub slices: Vec<SharedSlice>,
}

impl ModelSet {
    pub fn new(custom_types: Vec<CustomType>, slices: Vec<SharedSlice>) -> Self {
        Self {
            custom_types,
            slices,
        }
    }
}

/// Bearer token for the Custom Types API. Lives for one run, never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthToken(<{} bytes>)", self.0.len())
    }
}

/// Trait for acquiring a bearer token from account credentials.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Log in once; the returned token is used verbatim as the bearer.
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, SyncError>;
}

/// Trait for the remote model store of one repository.
///
/// Implementors own the repository name and base URL; the token is passed per call.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ModelRepository: Send + Sync {
    /// List every custom type currently stored remotely.
    async fn list_custom_types(&self, token: &AuthToken) -> Result<Vec<CustomType>, SyncError>;

    /// List every shared slice currently stored remotely.
    async fn list_shared_slices(&self, token: &AuthToken)
        -> Result<Vec<SharedSlice>, SyncError>;

    /// Submit a whole transaction in one call. Success or failure covers the batch.
    async fn apply_bulk(
        &self,
        token: &AuthToken,
        transaction: &BulkTransaction,
    ) -> Result<(), SyncError>;
}
