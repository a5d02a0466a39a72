//! Scripted port implementations for use case tests.
//!
//! Each fake replays a queue of canned answers and records what it was asked.

use crate::adapters::portal::UnsupportedLogin;
use crate::domain::{
    CarrierKind, ClientIp, DomainError, FailureReason, LoginProfile, LoginResult, ProbeError,
    ProfileDraft, ProfileStoreError, UserAction,
};
use crate::ports::{InteractionPort, IpProber, LoginStrategy, ProfileStore, SessionEvent};
use crate::usecases::CarrierDispatcher;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub struct MemoryStore {
    pub stored: Mutex<Option<LoginProfile>>,
    pub writes: Mutex<Vec<LoginProfile>>,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn empty() -> Self {
        Self {
            stored: Mutex::new(None),
            writes: Mutex::new(Vec::new()),
            fail_writes: false,
        }
    }

    pub fn with(profile: LoginProfile) -> Self {
        Self {
            stored: Mutex::new(Some(profile)),
            ..Self::empty()
        }
    }

    pub fn failing(profile: Option<LoginProfile>) -> Self {
        Self {
            stored: Mutex::new(profile),
            fail_writes: true,
            ..Self::empty()
        }
    }

    pub fn writes(&self) -> Vec<LoginProfile> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ProfileStore for MemoryStore {
    async fn try_read(&self) -> Option<LoginProfile> {
        self.stored.lock().unwrap().clone()
    }

    async fn try_write(&self, profile: &LoginProfile) -> Result<(), ProfileStoreError> {
        if self.fail_writes {
            return Err(ProfileStoreError::Io("disk full".into()));
        }
        self.writes.lock().unwrap().push(profile.clone());
        *self.stored.lock().unwrap() = Some(profile.clone());
        Ok(())
    }
}

/// Replays probe results; answers `NotFound` once the script runs out.
pub struct ScriptedProber {
    script: Mutex<VecDeque<Result<ClientIp, ProbeError>>>,
    pub calls: Mutex<u32>,
}

impl ScriptedProber {
    pub fn new(script: impl IntoIterator<Item = Result<ClientIp, ProbeError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(0),
        }
    }

    pub fn always(ip: &str, times: usize) -> Self {
        Self::new((0..times).map(|_| Ok(ClientIp::new(ip))))
    }

    pub fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl IpProber for ScriptedProber {
    async fn probe_ip(&self) -> Result<ClientIp, ProbeError> {
        *self.calls.lock().unwrap() += 1;
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ProbeError::NotFound))
    }
}

/// Replays login results and records every (profile, ip) it was called with.
pub struct RecordingStrategy {
    script: Mutex<VecDeque<LoginResult>>,
    pub calls: Mutex<Vec<(LoginProfile, ClientIp)>>,
}

impl RecordingStrategy {
    pub fn new(script: impl IntoIterator<Item = LoginResult>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(LoginProfile, ClientIp)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LoginStrategy for RecordingStrategy {
    async fn login(&self, profile: &LoginProfile, ip: &ClientIp) -> LoginResult {
        self.calls
            .lock()
            .unwrap()
            .push((profile.clone(), ip.clone()));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(LoginResult::Failure(FailureReason::ProtocolError))
    }
}

/// Dispatcher with `mobile` for MobileB and unsupported strategies elsewhere.
pub fn dispatcher_with_mobile(mobile: Arc<RecordingStrategy>) -> Arc<CarrierDispatcher> {
    Arc::new(CarrierDispatcher::new(
        Arc::new(UnsupportedLogin::new(CarrierKind::TelecomA)),
        mobile,
        Arc::new(UnsupportedLogin::new(CarrierKind::UnicomC)),
        Arc::new(UnsupportedLogin::new(CarrierKind::CampusD)),
    ))
}

/// Scripted user. Picks Exit once the menu script runs out; cancels once drafts run out.
pub struct ScriptedUser {
    actions: Mutex<VecDeque<UserAction>>,
    drafts: Mutex<VecDeque<ProfileDraft>>,
    pub events: Mutex<Vec<SessionEvent>>,
    /// Profile shown by each menu render, in order.
    pub menus: Mutex<Vec<LoginProfile>>,
}

impl ScriptedUser {
    pub fn new(
        actions: impl IntoIterator<Item = UserAction>,
        drafts: impl IntoIterator<Item = ProfileDraft>,
    ) -> Self {
        Self {
            actions: Mutex::new(actions.into_iter().collect()),
            drafts: Mutex::new(drafts.into_iter().collect()),
            events: Mutex::new(Vec::new()),
            menus: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn menus(&self) -> Vec<LoginProfile> {
        self.menus.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl InteractionPort for ScriptedUser {
    async fn choose_action(&self, profile: &LoginProfile) -> Result<UserAction, DomainError> {
        self.menus.lock().unwrap().push(profile.clone());
        Ok(self
            .actions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(UserAction::Exit))
    }

    async fn prompt_profile(
        &self,
        _current: Option<&LoginProfile>,
    ) -> Result<Option<ProfileDraft>, DomainError> {
        Ok(self.drafts.lock().unwrap().pop_front())
    }

    fn notify(&self, event: SessionEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn draft(carrier: CarrierKind, account: &str, password: &str) -> ProfileDraft {
    ProfileDraft {
        carrier: Some(carrier),
        account: account.to_string(),
        password: password.to_string(),
    }
}
