//! Remote model inventory.

use tracing::{error, info};

use crate::contract::{AuthToken, ModelRepository, ModelSet};
use crate::error::SyncError;

/// Fetch every custom type and shared slice from the repository.
///
/// Both list calls run concurrently. If either fails the call fails immediately and
/// whatever the other one returned is discarded.
pub async fn fetch_remote_models<R>(
    repository: &R,
    token: &AuthToken,
) -> Result<ModelSet, SyncError>
where
    R: ModelRepository + ?Sized,
{
    let (custom_types, slices) = tokio::try_join!(
        repository.list_custom_types(token),
        repository.list_shared_slices(token),
    )
    .map_err(|e| {
        error!(error = %e, "Failed to fetch remote models");
        e
    })?;

    info!(
        custom_types = custom_types.len(),
        slices = slices.len(),
        "Fetched remote models"
    );
    Ok(ModelSet::new(custom_types, slices))
}
