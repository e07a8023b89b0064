use tracing::{debug, info};

pub const DEFAULT_AUTH_URL: &str = "https://auth.prismic.io/login";
pub const DEFAULT_CUSTOM_TYPES_API: &str = "https://customtypes.prismic.io";

/// Process-wide settings for one push run, built once at startup and passed down explicitly.
///
/// Credentials are kept as given: an unset variable becomes an empty string and is
/// forwarded to the remote side untouched.
#[derive(Clone)]
pub struct SyncConfig {
    pub repository_name: String,
    pub api_token: String,
    pub email: String,
    pub password: String,
    pub endpoints: Endpoints,
}

/// Remote endpoints. Overridable so tests can point the clients at a local server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub auth_url: String,
    pub custom_types_api: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            custom_types_api: DEFAULT_CUSTOM_TYPES_API.to_string(),
        }
    }
}

impl SyncConfig {
    pub fn trace_loaded(&self) {
        info!(
            repository = %self.repository_name,
            api_token_set = !self.api_token.is_empty(),
            email_set = !self.email.is_empty(),
            password_set = !self.password.is_empty(),
            "Loaded SyncConfig"
        );
        debug!(endpoints = ?self.endpoints, "SyncConfig endpoints");
    }
}

// Hand-written so secrets never reach a log line through `?config`.
impl std::fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncConfig")
            .field("repository_name", &self.repository_name)
            .field("api_token", &"<redacted>")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("endpoints", &self.endpoints)
            .finish()
    }
}
