//! Project configuration and adapter resolution.
//!
//! A Slice Machine project declares its framework adapter and slice libraries in
//! `slicemachine.config.json`. Only a closed set of adapters is supported; resolving the
//! layout for any other adapter fails before anything else in a run touches disk or network.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, error, info};

use crate::error::SyncError;

pub const PROJECT_CONFIG_FILE: &str = "slicemachine.config.json";
pub const CUSTOM_TYPES_DIR: &str = "customtypes";
pub const DEFAULT_LIBRARY: &str = "./slices";

/// Supported framework integrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adapter {
    Next,
    Nuxt,
    SvelteKit,
}

impl Adapter {
    pub const SUPPORTED: [Adapter; 3] = [Adapter::Next, Adapter::Nuxt, Adapter::SvelteKit];

    pub fn package_name(&self) -> &'static str {
        match self {
            Adapter::Next => "@slicemachine/adapter-next",
            Adapter::Nuxt => "@slicemachine/adapter-nuxt",
            Adapter::SvelteKit => "@slicemachine/adapter-sveltekit",
        }
    }

    /// Classify an adapter package name. Anything outside [`Adapter::SUPPORTED`] is rejected
    /// with the name exactly as given.
    pub fn from_name(name: &str) -> Result<Self, SyncError> {
        Self::SUPPORTED
            .into_iter()
            .find(|adapter| adapter.package_name() == name)
            .ok_or_else(|| SyncError::UnsupportedAdapter(name.to_string()))
    }
}

/// The `adapter` key accepts a bare package name or `{ "resolve": "<name>", "options": ... }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdapterSpec {
    Name(String),
    Resolve {
        resolve: String,
        #[serde(default)]
        options: Option<serde_json::Value>,
    },
}

impl AdapterSpec {
    pub fn name(&self) -> &str {
        match self {
            AdapterSpec::Name(name) => name,
            AdapterSpec::Resolve { resolve, .. } => resolve,
        }
    }
}

/// The parts of `slicemachine.config.json` a push run needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectManifest {
    #[serde(default)]
    pub repository_name: Option<String>,
    pub adapter: AdapterSpec,
    #[serde(default = "default_libraries")]
    pub libraries: Vec<String>,
}

fn default_libraries() -> Vec<String> {
    vec![DEFAULT_LIBRARY.to_string()]
}

/// A project on disk: its root directory and parsed manifest.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub manifest: ProjectManifest,
}

impl Project {
    /// Read the manifest from `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, SyncError> {
        let root = root.into();
        let manifest = read_project_manifest(&root)?;
        Ok(Self { root, manifest })
    }
}

/// Where a supported adapter keeps its models on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelLayout {
    pub adapter: Adapter,
    pub custom_types_dir: PathBuf,
    pub slice_libraries: Vec<PathBuf>,
}

/// Read and parse `slicemachine.config.json` from the project root.
pub fn read_project_manifest(project_root: &Path) -> Result<ProjectManifest, SyncError> {
    let path = project_root.join(PROJECT_CONFIG_FILE);
    info!(config_path = %path.display(), "Loading project configuration");

    let content = fs::read_to_string(&path).map_err(|source| {
        error!(error = ?source, config_path = %path.display(), "Failed to read project configuration");
        SyncError::ProjectConfig {
            path: path.clone(),
            source,
        }
    })?;

    let manifest: ProjectManifest = serde_json::from_str(&content).map_err(|source| {
        error!(error = ?source, config_path = %path.display(), "Failed to parse project configuration");
        SyncError::ProjectConfigParse {
            path: path.clone(),
            source,
        }
    })?;

    debug!(?manifest, "Project configuration parsed");
    Ok(manifest)
}

/// Select the on-disk layout for the project's adapter.
///
/// Pure classification: nothing is read and nothing is sent.
pub fn resolve_layout(
    project_root: &Path,
    manifest: &ProjectManifest,
) -> Result<ModelLayout, SyncError> {
    let name = manifest.adapter.name();
    let adapter = Adapter::from_name(name).map_err(|e| {
        error!(adapter = %name, "Unsupported adapter in project configuration");
        e
    })?;

    let layout = match adapter {
        // All supported adapters share the Slice Machine layout.
        Adapter::Next | Adapter::Nuxt | Adapter::SvelteKit => ModelLayout {
            adapter,
            custom_types_dir: project_root.join(CUSTOM_TYPES_DIR),
            slice_libraries: manifest
                .libraries
                .iter()
                .map(|library| project_root.join(library))
                .collect(),
        },
    };

    info!(
        adapter = adapter.package_name(),
        custom_types_dir = %layout.custom_types_dir.display(),
        libraries = layout.slice_libraries.len(),
        "Resolved model layout"
    );
    Ok(layout)
}
