//! Carrier strategy dispatch: one LoginStrategy per CarrierKind.
//!
//! The table is a struct with one slot per carrier, so a new carrier cannot be
//! added without giving it a strategy.

use crate::domain::{CarrierKind, ClientIp, LoginProfile, LoginResult};
use crate::ports::LoginStrategy;
use std::sync::Arc;
use tracing::info;

pub struct CarrierDispatcher {
    telecom: Arc<dyn LoginStrategy>,
    mobile: Arc<dyn LoginStrategy>,
    unicom: Arc<dyn LoginStrategy>,
    campus: Arc<dyn LoginStrategy>,
}

impl CarrierDispatcher {
    pub fn new(
        telecom: Arc<dyn LoginStrategy>,
        mobile: Arc<dyn LoginStrategy>,
        unicom: Arc<dyn LoginStrategy>,
        campus: Arc<dyn LoginStrategy>,
    ) -> Self {
        Self {
            telecom,
            mobile,
            unicom,
            campus,
        }
    }

    pub fn strategy_for(&self, carrier: CarrierKind) -> &dyn LoginStrategy {
        match carrier {
            CarrierKind::TelecomA => self.telecom.as_ref(),
            CarrierKind::MobileB => self.mobile.as_ref(),
            CarrierKind::UnicomC => self.unicom.as_ref(),
            CarrierKind::CampusD => self.campus.as_ref(),
        }
    }

    /// Log in with the strategy mapped to the profile's carrier.
    pub async fn login(&self, profile: &LoginProfile, ip: &ClientIp) -> LoginResult {
        info!(carrier = %profile.carrier, ip = %ip, "dispatching login");
        self.strategy_for(profile.carrier).login(profile, ip).await
    }
}
