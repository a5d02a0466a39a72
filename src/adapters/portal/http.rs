//! Shared HTTP client for the portal. One `reqwest::Client` per run.

use crate::domain::DomainError;
use crate::shared::config::{PORTAL_LOGIN_URL, PORTAL_STATUS_URL};
use reqwest::Client;
use std::time::Duration;

/// Portal connection: HTTP client plus the two endpoints it talks to.
pub struct PortalHttp {
    client: Client,
    status_url: String,
    login_url: String,
}

impl PortalHttp {
    /// Client against the fixed campus portal endpoints.
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        Self::with_endpoints(PORTAL_STATUS_URL, PORTAL_LOGIN_URL, timeout)
    }

    /// Client against arbitrary endpoints (mock servers in tests).
    pub fn with_endpoints(
        status_url: impl Into<String>,
        login_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            status_url: status_url.into(),
            login_url: login_url.into(),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn status_url(&self) -> &str {
        &self.status_url
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }
}
