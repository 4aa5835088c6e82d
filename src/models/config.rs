//! Client configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "NOVEL_API_URL";

/// Environment variable overriding the image base URL.
pub const ENV_IMG_URL: &str = "NOVEL_IMG_URL";

/// Root client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every API path is appended to
    #[serde(default = "defaults::api_base_url")]
    pub api_base_url: String,

    /// Base URL for relative image references
    #[serde(default)]
    pub image_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Path fragments that never receive an Authorization header
    #[serde(default = "defaults::allow_list")]
    pub allow_list: Vec<String>,

    /// View the user is sent to when the session ends
    #[serde(default = "defaults::login_path")]
    pub login_path: String,

    /// Delay before redirecting after an HTTP 401
    #[serde(default = "defaults::unauthorized_redirect_delay")]
    pub unauthorized_redirect_delay_ms: u64,

    /// File holding the persisted credentials
    #[serde(default = "defaults::credentials_file")]
    pub credentials_file: PathBuf,

    /// User-facing message table
    #[serde(default)]
    pub messages: Messages,
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply base URL overrides from the process environment.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = non_empty_env(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(url) = non_empty_env(ENV_IMG_URL) {
            self.image_base_url = url;
        }
        self
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api_base_url)?;
        if self.timeout_secs == 0 {
            return Err(AppError::validation("timeout_secs must be > 0"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(AppError::validation("user_agent is empty"));
        }
        if !self.login_path.starts_with('/') {
            return Err(AppError::validation("login_path must start with '/'"));
        }
        if self.allow_list.iter().any(|p| p.trim().is_empty()) {
            return Err(AppError::validation("allow_list contains an empty entry"));
        }
        Ok(())
    }

    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Redirect delay applied after an HTTP 401.
    pub fn unauthorized_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.unauthorized_redirect_delay_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: defaults::api_base_url(),
            image_base_url: String::new(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
            allow_list: defaults::allow_list(),
            login_path: defaults::login_path(),
            unauthorized_redirect_delay_ms: defaults::unauthorized_redirect_delay(),
            credentials_file: defaults::credentials_file(),
            messages: Messages::default(),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// User-facing message strings.
///
/// `request_failed` may contain a `{status}` placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Messages {
    #[serde(default = "defaults::msg_malformed_response")]
    pub malformed_response: String,
    #[serde(default = "defaults::msg_business_failed")]
    pub business_failed: String,
    #[serde(default = "defaults::msg_bad_request")]
    pub bad_request: String,
    #[serde(default = "defaults::msg_unauthorized")]
    pub unauthorized: String,
    #[serde(default = "defaults::msg_forbidden")]
    pub forbidden: String,
    #[serde(default = "defaults::msg_not_found")]
    pub not_found: String,
    #[serde(default = "defaults::msg_server_error")]
    pub server_error: String,
    #[serde(default = "defaults::msg_request_failed")]
    pub request_failed: String,
    #[serde(default = "defaults::msg_network")]
    pub network: String,
    #[serde(default = "defaults::msg_request_config")]
    pub request_config: String,
}

impl Messages {
    /// Fixed message for an HTTP error status, if the status has one.
    pub fn for_status(&self, status: u16) -> Option<&str> {
        match status {
            400 => Some(&self.bad_request),
            401 => Some(&self.unauthorized),
            403 => Some(&self.forbidden),
            404 => Some(&self.not_found),
            500 => Some(&self.server_error),
            _ => None,
        }
    }

    /// Generic message for a status outside the fixed table.
    pub fn request_failed(&self, status: u16) -> String {
        self.request_failed.replace("{status}", &status.to_string())
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            malformed_response: defaults::msg_malformed_response(),
            business_failed: defaults::msg_business_failed(),
            bad_request: defaults::msg_bad_request(),
            unauthorized: defaults::msg_unauthorized(),
            forbidden: defaults::msg_forbidden(),
            not_found: defaults::msg_not_found(),
            server_error: defaults::msg_server_error(),
            request_failed: defaults::msg_request_failed(),
            network: defaults::msg_network(),
            request_config: defaults::msg_request_config(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Client defaults
    pub fn api_base_url() -> String {
        "http://localhost:8888/api".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn user_agent() -> String {
        concat!("novel-client/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn allow_list() -> Vec<String> {
        vec!["/user/login".into(), "/user/register".into()]
    }
    pub fn login_path() -> String {
        "/login".into()
    }
    pub fn unauthorized_redirect_delay() -> u64 {
        1000
    }
    pub fn credentials_file() -> PathBuf {
        PathBuf::from("credentials.json")
    }

    // Message defaults
    pub fn msg_malformed_response() -> String {
        "Malformed server response".into()
    }
    pub fn msg_business_failed() -> String {
        "Business processing failed".into()
    }
    pub fn msg_bad_request() -> String {
        "Invalid request parameters".into()
    }
    pub fn msg_unauthorized() -> String {
        "Please log in first".into()
    }
    pub fn msg_forbidden() -> String {
        "Insufficient permissions".into()
    }
    pub fn msg_not_found() -> String {
        "Requested endpoint does not exist".into()
    }
    pub fn msg_server_error() -> String {
        "Internal server error".into()
    }
    pub fn msg_request_failed() -> String {
        "Request failed ({status})".into()
    }
    pub fn msg_network() -> String {
        "Network connection failed, please check your connection".into()
    }
    pub fn msg_request_config() -> String {
        "Request configuration error".into()
    }
}
