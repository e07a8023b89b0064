//! High-level pipeline: pushes a project's local models to the remote repository.
//!
//! One run is a straight line with a single gate:
//!   - resolve the project's adapter into a model layout (unsupported adapters stop here,
//!     before any model file is read or any request is sent)
//!   - log in; the login response body is the bearer token for the rest of the run
//!   - load local models and fetch remote models concurrently
//!   - diff remote ("existing") against local ("desired") into a [`BulkTransaction`]
//!   - apply the transaction in one call, unless this is a dry run
//!
//! There is no rollback: a failing apply fails the run and nothing is compensated.
//!
//! # Navigation
//! - Main entrypoint: [`synchronise`]
//! - Supporting types: [`SyncOptions`], [`SyncReport`]

use tracing::{error, info};

use crate::adapter::{resolve_layout, Project};
use crate::config::SyncConfig;
use crate::contract::{Authenticator, ModelRepository};
use crate::diff::{build_transaction, BulkTransaction, ChangeKind, ModelKind};
use crate::error::SyncError;
use crate::loader::load_local_models;
use crate::remote::fetch_remote_models;

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Build the transaction but do not submit it.
    pub dry_run: bool,
}

/// What a run saw and did.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub local: ModelCounts,
    pub remote: ModelCounts,
    pub operations: Vec<OperationSummary>,
    pub applied: bool,
    pub transaction: BulkTransaction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelCounts {
    pub custom_types: usize,
    pub slices: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSummary {
    pub kind: ModelKind,
    pub id: String,
    pub operation: ChangeKind,
}

pub async fn synchronise<A, R>(
    config: &SyncConfig,
    project: &Project,
    authenticator: &A,
    repository: &R,
    options: SyncOptions,
) -> Result<SyncReport, SyncError>
where
    A: Authenticator + ?Sized,
    R: ModelRepository + ?Sized,
{
    info!(
        repository = %config.repository_name,
        project_root = %project.root.display(),
        dry_run = options.dry_run,
        "[SYNC] Starting push"
    );

    let layout = resolve_layout(&project.root, &project.manifest)?;

    let token = authenticator
        .login(&config.email, &config.password)
        .await
        .map_err(|e| {
            error!(error = %e, "[SYNC][ERROR] Login failed");
            e
        })?;
    info!(token_len = token.as_str().len(), "[SYNC] Authenticated");

    let (desired, existing) = tokio::try_join!(
        load_local_models(&layout),
        fetch_remote_models(repository, &token),
    )?;

    let transaction = build_transaction(&existing, &desired);
    info!(
        changes = transaction.len(),
        inserts = transaction.count(ModelKind::CustomType, ChangeKind::Insert)
            + transaction.count(ModelKind::Slice, ChangeKind::Insert),
        updates = transaction.count(ModelKind::CustomType, ChangeKind::Update)
            + transaction.count(ModelKind::Slice, ChangeKind::Update),
        deletes = transaction.count(ModelKind::CustomType, ChangeKind::Delete)
            + transaction.count(ModelKind::Slice, ChangeKind::Delete),
        "[SYNC] Built bulk transaction"
    );

    let applied = if options.dry_run {
        info!("[SYNC] Dry run, transaction not applied");
        false
    } else {
        repository
            .apply_bulk(&token, &transaction)
            .await
            .map_err(|e| {
                error!(error = %e, "[SYNC][ERROR] Bulk apply failed");
                e
            })?;
        info!(changes = transaction.len(), "[SYNC] Bulk transaction applied");
        true
    };

    let operations = transaction
        .changes
        .iter()
        .map(|c| OperationSummary {
            kind: c.kind,
            id: c.id.clone(),
            operation: c.operation,
        })
        .collect();

    Ok(SyncReport {
        local: ModelCounts {
            custom_types: desired.custom_types.len(),
            slices: desired.slices.len(),
        },
        remote: ModelCounts {
            custom_types: existing.custom_types.len(),
            slices: existing.slices.len(),
        },
        operations,
        applied,
        transaction,
    })
}
