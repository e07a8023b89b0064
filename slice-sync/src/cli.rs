//! CLI glue for slice-sync: argument parsing and wiring of the concrete clients into the
//! core pipeline.
//!
//! All non-trivial logic lives in `slice-sync-core`; this module only turns arguments and
//! environment into a [`Project`], a [`SyncConfig`](slice_sync_core::config::SyncConfig)
//! and the HTTP implementations of the core traits.
//!
//! For programmatic and integration use, call [`run`] with a constructed [`Cli`].

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slice_sync_core::adapter::Project;
use slice_sync_core::synchronise::{synchronise, SyncOptions};

use crate::auth::PrismicAuthenticator;
use crate::client::CustomTypesClient;
use crate::load_config::load_config;

/// CLI for slice-sync: push local custom types and shared slices to Prismic.
#[derive(Parser)]
#[clap(
    name = "slice-sync",
    version,
    about = "Push locally authored Prismic custom types and shared slices to the Custom Types API"
)]
pub struct Cli {
    /// Slice Machine project root (defaults to the current directory)
    #[clap(long, global = true)]
    pub project_dir: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Diff local models against the repository and apply the difference in one bulk call
    Push {
        /// Print the planned bulk transaction as JSON instead of applying it
        #[clap(long)]
        dry_run: bool,
    },
}

/// Async CLI entrypoint shared by `main()` and integration tests.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Push { dry_run } => {
            let root = match cli.project_dir {
                Some(dir) => dir,
                None => std::env::current_dir().context("cannot determine current directory")?,
            };
            let project = Project::open(&root)
                .with_context(|| format!("failed to open project at {}", root.display()))?;

            let config = load_config();
            if let Some(name) = project.manifest.repository_name.as_deref() {
                if name != config.repository_name {
                    tracing::warn!(
                        project = name,
                        env = %config.repository_name,
                        "Repository in project configuration differs from REPO, pushing to REPO"
                    );
                }
            }

            let http = reqwest::Client::new();
            let authenticator = PrismicAuthenticator::new(http.clone(), &config.endpoints.auth_url);
            let repository = CustomTypesClient::new(
                http,
                &config.endpoints.custom_types_api,
                &config.repository_name,
            );

            tracing::info!(command = "push", dry_run, "Starting push");
            let report = synchronise(
                &config,
                &project,
                &authenticator,
                &repository,
                SyncOptions { dry_run },
            )
            .await
            .context("push failed")?;

            if dry_run {
                let planned = serde_json::to_string_pretty(&report.transaction)
                    .context("failed to render bulk transaction")?;
                println!("{planned}");
            }
            tracing::info!(
                command = "push",
                changes = report.operations.len(),
                applied = report.applied,
                "Push complete"
            );
            Ok(())
        }
    }
}
