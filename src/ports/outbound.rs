//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{ClientIp, LoginProfile, LoginResult, ProbeError, ProfileStoreError};

/// Portal status page. Discovers the IP the portal assigned to this client.
#[async_trait::async_trait]
pub trait IpProber: Send + Sync {
    /// Fetch the status page once and extract the client IP. No internal retries.
    async fn probe_ip(&self) -> Result<ClientIp, ProbeError>;
}

/// One carrier's login protocol.
///
/// Every failure is reported through `LoginResult::Failure`; implementations never
/// return an error or panic for a network or parsing problem.
#[async_trait::async_trait]
pub trait LoginStrategy: Send + Sync {
    async fn login(&self, profile: &LoginProfile, ip: &ClientIp) -> LoginResult;
}

/// Persisted login profile. Storage format is up to the adapter.
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// `None` when no usable profile is stored (missing, unreadable, or malformed).
    async fn try_read(&self) -> Option<LoginProfile>;

    async fn try_write(&self, profile: &LoginProfile) -> Result<(), ProfileStoreError>;
}
