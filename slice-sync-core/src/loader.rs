//! Local model loading: find model files under a directory tree and parse them.

use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};
use walkdir::WalkDir;

use crate::adapter::ModelLayout;
use crate::contract::{CustomType, ModelSet, SharedSlice};
use crate::error::SyncError;

pub const CUSTOM_TYPE_FILE: &str = "index.json";
pub const SLICE_MODEL_FILE: &str = "model.json";

/// Every non-directory entry under `root`, at any depth, whose file name is `file_name`.
///
/// A missing or unreadable `root` is an `Io` error. Order is file-name order per directory
/// and carries no meaning.
pub fn find_model_files(root: &Path, file_name: &str) -> Result<Vec<PathBuf>, SyncError> {
    let mut matches = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            error!(error = ?e, path = %path.display(), "Failed to walk model directory");
            SyncError::Io {
                path,
                source: e.into(),
            }
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        if entry.file_name() == file_name {
            matches.push(entry.into_path());
        }
    }
    Ok(matches)
}

/// Load and parse every `file_name` under `root` as `T`.
///
/// The directory walk runs on the blocking pool. One malformed file fails the whole load.
pub async fn load_models<T>(root: &Path, file_name: &str) -> Result<Vec<T>, SyncError>
where
    T: DeserializeOwned,
{
    let paths = {
        let root = root.to_path_buf();
        let file_name = file_name.to_string();
        tokio::task::spawn_blocking(move || find_model_files(&root, &file_name))
    }
    .await
    .map_err(|e| SyncError::Io {
        path: root.to_path_buf(),
        source: e.into(),
    })??;
    let mut models = Vec::with_capacity(paths.len());
    for path in paths {
        let content = tokio::fs::read_to_string(&path).await.map_err(|source| {
            error!(error = ?source, path = %path.display(), "Failed to read model file");
            SyncError::Io {
                path: path.clone(),
                source,
            }
        })?;
        let model = serde_json::from_str(&content).map_err(|source| {
            error!(error = ?source, path = %path.display(), "Failed to parse model file");
            SyncError::Parse {
                path: path.clone(),
                source,
            }
        })?;
        debug!(path = %path.display(), "Loaded model file");
        models.push(model);
    }
    info!(root = %root.display(), file_name, count = models.len(), "Loaded models");
    Ok(models)
}

/// Build the desired model set from the local project tree.
///
/// Slice libraries are loaded concurrently; the first failing library fails the call and
/// results from the others are dropped. Libraries are concatenated in declaration order.
pub async fn load_local_models(layout: &ModelLayout) -> Result<ModelSet, SyncError> {
    let custom_types: Vec<CustomType> =
        load_models(&layout.custom_types_dir, CUSTOM_TYPE_FILE).await?;

    let per_library = try_join_all(
        layout
            .slice_libraries
            .iter()
            .map(|library| load_models::<SharedSlice>(library, SLICE_MODEL_FILE)),
    )
    .await?;
    let slices: Vec<SharedSlice> = per_library.into_iter().flatten().collect();

    info!(
        custom_types = custom_types.len(),
        slices = slices.len(),
        "Loaded local models"
    );
    Ok(ModelSet::new(custom_types, slices))
}
