//! Headless login: one probe, one attempt, no prompts and no saving.
//!
//! Used when the binary runs from a script or at boot instead of a terminal.

use crate::domain::{FailureReason, LoginProfile, LoginResult};
use crate::ports::{IpProber, ProfileStore};
use crate::usecases::CarrierDispatcher;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleShotOutcome {
    /// No inline profile and nothing usable in the profile store.
    NoProfile,
    Attempted(LoginResult),
}

impl SingleShotOutcome {
    /// Process exit code: 0 success, 1 login failure, 2 no profile.
    pub fn exit_code(self) -> i32 {
        match self {
            SingleShotOutcome::Attempted(LoginResult::Success) => 0,
            SingleShotOutcome::Attempted(LoginResult::Failure(_)) => 1,
            SingleShotOutcome::NoProfile => 2,
        }
    }
}

pub struct SingleShotLogin {
    store: Arc<dyn ProfileStore>,
    prober: Arc<dyn IpProber>,
    dispatcher: Arc<CarrierDispatcher>,
}

impl SingleShotLogin {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        prober: Arc<dyn IpProber>,
        dispatcher: Arc<CarrierDispatcher>,
    ) -> Self {
        Self {
            store,
            prober,
            dispatcher,
        }
    }

    /// `inline` (from configuration) wins over the stored profile.
    pub async fn run(&self, inline: Option<LoginProfile>) -> SingleShotOutcome {
        let profile = match inline {
            Some(p) => p,
            None => match self.store.try_read().await {
                Some(p) => p,
                None => {
                    warn!("headless login: no profile configured or stored");
                    return SingleShotOutcome::NoProfile;
                }
            },
        };

        let ip = match self.prober.probe_ip().await {
            Ok(ip) => ip,
            Err(e) => {
                warn!(error = %e, "headless login: IP probe failed");
                return SingleShotOutcome::Attempted(LoginResult::Failure(
                    FailureReason::IpProbeFailed,
                ));
            }
        };

        let result = self.dispatcher.login(&profile, &ip).await;
        info!(ip = %ip, ?result, "headless login finished");
        SingleShotOutcome::Attempted(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CarrierKind, ProbeError};
    use crate::usecases::fakes::{
        MemoryStore, RecordingStrategy, ScriptedProber, dispatcher_with_mobile,
    };

    fn mobile(password: &str) -> LoginProfile {
        LoginProfile::new(CarrierKind::MobileB, "114514", password)
    }

    #[tokio::test]
    async fn test_inline_profile_takes_precedence() {
        let strategy = Arc::new(RecordingStrategy::new([LoginResult::Success]));
        let shot = SingleShotLogin::new(
            Arc::new(MemoryStore::with(mobile("stored"))),
            Arc::new(ScriptedProber::always("10.9.1.5", 1)),
            dispatcher_with_mobile(strategy.clone()),
        );

        let outcome = shot.run(Some(mobile("inline"))).await;

        assert_eq!(outcome, SingleShotOutcome::Attempted(LoginResult::Success));
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(strategy.calls()[0].0.password, "inline");
    }

    #[tokio::test]
    async fn test_falls_back_to_store() {
        let strategy = Arc::new(RecordingStrategy::new([LoginResult::Failure(
            FailureReason::InvalidCredentials,
        )]));
        let shot = SingleShotLogin::new(
            Arc::new(MemoryStore::with(mobile("stored"))),
            Arc::new(ScriptedProber::always("10.9.1.5", 1)),
            dispatcher_with_mobile(strategy.clone()),
        );

        let outcome = shot.run(None).await;

        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(strategy.calls()[0].0.password, "stored");
    }

    #[tokio::test]
    async fn test_no_profile_and_probe_failure() {
        let strategy = Arc::new(RecordingStrategy::new([]));
        let shot = SingleShotLogin::new(
            Arc::new(MemoryStore::empty()),
            Arc::new(ScriptedProber::new([Err(ProbeError::NotFound)])),
            dispatcher_with_mobile(strategy.clone()),
        );
        assert_eq!(shot.run(None).await, SingleShotOutcome::NoProfile);

        let outcome = shot.run(Some(mobile("x"))).await;
        assert_eq!(
            outcome,
            SingleShotOutcome::Attempted(LoginResult::Failure(FailureReason::IpProbeFailed))
        );
        assert!(strategy.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_inline_password_is_no_profile() {
        let cfg = crate::shared::AppConfig {
            carrier: Some(crate::domain::CarrierKind::MobileB),
            account: Some("114514".into()),
            password: Some(String::new()),
            ..Default::default()
        };
        let strategy = Arc::new(RecordingStrategy::new([]));
        let shot = SingleShotLogin::new(
            Arc::new(MemoryStore::empty()),
            Arc::new(ScriptedProber::always("10.9.1.5", 1)),
            dispatcher_with_mobile(strategy.clone()),
        );

        let outcome = shot.run(cfg.inline_profile()).await;

        assert_eq!(outcome, SingleShotOutcome::NoProfile);
        assert_eq!(outcome.exit_code(), 2);
        assert!(strategy.calls().is_empty());
    }
}
