//! LoginStrategy for carriers whose portal protocol is not implemented.

use crate::domain::{CarrierKind, ClientIp, FailureReason, LoginProfile, LoginResult};
use crate::ports::LoginStrategy;
use tracing::warn;

/// Always answers `Failure(UnsupportedCarrier)` without touching the network.
pub struct UnsupportedLogin {
    carrier: CarrierKind,
}

impl UnsupportedLogin {
    pub fn new(carrier: CarrierKind) -> Self {
        Self { carrier }
    }
}

#[async_trait::async_trait]
impl LoginStrategy for UnsupportedLogin {
    async fn login(&self, _profile: &LoginProfile, _ip: &ClientIp) -> LoginResult {
        warn!(carrier = %self.carrier, "no login protocol for carrier");
        LoginResult::Failure(FailureReason::UnsupportedCarrier)
    }
}
