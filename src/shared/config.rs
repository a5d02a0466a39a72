//! Application configuration. Profile location, timeouts, headless mode.
//!
//! Portal endpoints are fixed constants, not configuration.

use crate::domain::{CarrierKind, DomainError, LoginProfile};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Portal status page that reveals the client IP.
pub const PORTAL_STATUS_URL: &str = "http://10.9.1.3/";

/// Portal login endpoint (port 801).
pub const PORTAL_LOGIN_URL: &str = "http://10.9.1.3:801/eportal/";

pub const DEFAULT_PROFILE_PATH: &str = "./login_profile.json";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Where the JSON profile is read from and saved to. Read from CAMPUS_LOGIN_PROFILE_PATH.
    #[serde(default)]
    pub profile_path: Option<String>,

    /// Per-request timeout in seconds for portal calls. Read from CAMPUS_LOGIN_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Log in once without prompts and exit. Read from CAMPUS_LOGIN_HEADLESS.
    #[serde(default)]
    pub headless: Option<bool>,

    // ─────────────────────────────────────────────────────────────────────────
    // Inline profile (headless only; takes precedence over the profile file)
    // ─────────────────────────────────────────────────────────────────────────
    #[serde(default)]
    pub carrier: Option<CarrierKind>,

    #[serde(default)]
    pub account: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("CAMPUS_LOGIN_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        // No try_parsing: account and password must stay strings ("007" is not 7).
        c = c.add_source(config::Environment::with_prefix("CAMPUS_LOGIN"));
        c.build()?.try_deserialize()
    }

    /// Settle a `load()` result. A broken configuration falls back to defaults
    /// for the interactive run and is fatal when `CAMPUS_LOGIN_HEADLESS` is set.
    pub fn resolve(
        loaded: Result<Self, config::ConfigError>,
        headless_env: Option<&str>,
    ) -> Result<Self, DomainError> {
        match loaded {
            Ok(cfg) => Ok(cfg),
            Err(e) if headless_env.is_some_and(is_truthy) => {
                Err(DomainError::Config(e.to_string()))
            }
            Err(e) => {
                warn!(error = %e, "invalid configuration; using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn profile_path_or_default(&self) -> PathBuf {
        PathBuf::from(
            self.profile_path
                .as_deref()
                .unwrap_or(DEFAULT_PROFILE_PATH),
        )
    }

    /// Request timeout. Defaults to 10s; zero is treated as unset.
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .request_timeout_secs
            .filter(|&s| s > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn is_headless(&self) -> bool {
        self.headless.unwrap_or(false)
    }

    /// Profile given directly in config. All three fields must be present and non-empty.
    pub fn inline_profile(&self) -> Option<LoginProfile> {
        let carrier = self.carrier?;
        let account = self.account.as_deref().map(str::trim).filter(|a| !a.is_empty())?;
        let password = self.password.clone().filter(|p| !p.is_empty())?;
        Some(LoginProfile::new(carrier, account, password))
    }
}

/// Same spellings `config` accepts for a bool.
fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
