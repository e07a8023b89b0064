//! `load_config`: reads the run configuration from the process environment.
//!
//! This is the only place that touches environment variables. Everything downstream
//! receives an explicit [`SyncConfig`].
//!
//! | variable                   | field                         |
//! |----------------------------|-------------------------------|
//! | `REPO`                     | `repository_name`             |
//! | `CT_API_TOKEN`             | `api_token`                   |
//! | `EMAIL`                    | `email`                       |
//! | `PASSWORD`                 | `password`                    |
//! | `PRISMIC_AUTH_URL`         | `endpoints.auth_url`          |
//! | `PRISMIC_CUSTOM_TYPES_API` | `endpoints.custom_types_api`  |
//!
//! Unset credentials become empty strings and are passed through without validation.

use slice_sync_core::config::{Endpoints, SyncConfig};
use tracing::{info, warn};

pub const ENV_REPOSITORY: &str = "REPO";
pub const ENV_API_TOKEN: &str = "CT_API_TOKEN";
pub const ENV_EMAIL: &str = "EMAIL";
pub const ENV_PASSWORD: &str = "PASSWORD";
pub const ENV_AUTH_URL: &str = "PRISMIC_AUTH_URL";
pub const ENV_CUSTOM_TYPES_API: &str = "PRISMIC_CUSTOM_TYPES_API";

fn var_or_empty(key: &str) -> String {
    match std::env::var(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(var = key, error = %e, "Environment variable not usable, passing empty value");
            String::new()
        }
    }
}

/// Build a [`SyncConfig`] from the current environment. Never fails.
pub fn load_config() -> SyncConfig {
    let defaults = Endpoints::default();
    let endpoints = Endpoints {
        auth_url: std::env::var(ENV_AUTH_URL).unwrap_or(defaults.auth_url),
        custom_types_api: std::env::var(ENV_CUSTOM_TYPES_API)
            .unwrap_or(defaults.custom_types_api),
    };

    let config = SyncConfig {
        repository_name: var_or_empty(ENV_REPOSITORY),
        api_token: var_or_empty(ENV_API_TOKEN),
        email: var_or_empty(ENV_EMAIL),
        password: var_or_empty(ENV_PASSWORD),
        endpoints,
    };

    info!("Configuration loaded from environment");
    config.trace_loaded();
    config
}
