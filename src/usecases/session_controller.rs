//! Interactive login session: load or create a profile, then loop on the menu
//! until a login succeeds or the user exits.
//!
//! - Every login attempt is an explicit user action; nothing retries on its own
//! - The client IP is probed again before every attempt
//! - The profile is saved on the way out only if it was created or edited this run
//!
//! State machine:
//! `Start -> ProfileReady -> Idle -> {Authenticating, EditingProfile, Exiting}`,
//! `Authenticating -> {Idle, Done}`, `EditingProfile -> Idle`.

use crate::domain::{DomainError, FailureReason, LoginProfile, LoginResult, ProfileStoreError, UserAction};
use crate::ports::{InteractionPort, IpProber, ProfileStore, SessionEvent};
use crate::usecases::CarrierDispatcher;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Start,
    ProfileReady,
    Idle,
    Authenticating,
    EditingProfile,
    Exiting,
    Done,
}

/// How the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// A login attempt succeeded.
    Done,
    /// The user chose to exit (or cancelled profile creation).
    Exited,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    /// Profile was not created or edited this run.
    NotNeeded,
    Saved,
    /// Reported to the user; the run still ends normally.
    Failed(ProfileStoreError),
}

/// Summary of a finished session.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub terminal: Terminal,
    pub attempts: u32,
    pub last_result: Option<LoginResult>,
    pub save: SaveStatus,
    pub profile: Option<LoginProfile>,
}

/// Mutable state of one run. Only the controller touches it, between user actions.
#[derive(Debug, Default)]
struct Session {
    profile: Option<LoginProfile>,
    changed: bool,
    attempts: u32,
    last_result: Option<LoginResult>,
}

pub struct SessionController {
    store: Arc<dyn ProfileStore>,
    prober: Arc<dyn IpProber>,
    dispatcher: Arc<CarrierDispatcher>,
    ui: Arc<dyn InteractionPort>,
}

impl SessionController {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        prober: Arc<dyn IpProber>,
        dispatcher: Arc<CarrierDispatcher>,
        ui: Arc<dyn InteractionPort>,
    ) -> Self {
        Self {
            store,
            prober,
            dispatcher,
            ui,
        }
    }

    /// Drive the session to a terminal state. Only a UI failure is returned as an error.
    pub async fn run(&self) -> Result<SessionReport, DomainError> {
        let mut session = Session::default();
        let mut state = SessionState::Start;

        while !matches!(state, SessionState::Done | SessionState::Exiting) {
            debug!(?state, "session state");
            state = match state {
                SessionState::Start => self.ensure_profile(&mut session).await?,
                SessionState::ProfileReady => SessionState::Idle,
                SessionState::Idle => self.idle(&session).await?,
                SessionState::Authenticating => self.authenticate(&mut session).await,
                SessionState::EditingProfile => self.edit_profile(&mut session).await?,
                SessionState::Exiting | SessionState::Done => state,
            };
        }

        let terminal = if state == SessionState::Done {
            Terminal::Done
        } else {
            Terminal::Exited
        };
        let save = self.persist_if_changed(&session).await;
        info!(?terminal, attempts = session.attempts, "session finished");

        Ok(SessionReport {
            terminal,
            attempts: session.attempts,
            last_result: session.last_result,
            save,
            profile: session.profile,
        })
    }

    async fn ensure_profile(&self, session: &mut Session) -> Result<SessionState, DomainError> {
        if let Some(profile) = self.store.try_read().await {
            session.profile = Some(profile);
            return Ok(SessionState::ProfileReady);
        }

        info!("no stored profile; starting profile creation");
        self.ui.notify(SessionEvent::ProfileMissing);
        match self.collect_profile(None).await? {
            Some(profile) => {
                session.profile = Some(profile);
                session.changed = true;
                Ok(SessionState::ProfileReady)
            }
            None => {
                info!("profile creation cancelled");
                Ok(SessionState::Exiting)
            }
        }
    }

    async fn idle(&self, session: &Session) -> Result<SessionState, DomainError> {
        let Some(profile) = session.profile.as_ref() else {
            return Ok(SessionState::Exiting);
        };
        let next = match self.ui.choose_action(profile).await? {
            UserAction::LoginOrRetry => SessionState::Authenticating,
            UserAction::EditProfile => SessionState::EditingProfile,
            UserAction::Exit => SessionState::Exiting,
        };
        Ok(next)
    }

    /// One attempt: probe, then dispatch. Never mutates the profile.
    async fn authenticate(&self, session: &mut Session) -> SessionState {
        let Some(profile) = session.profile.as_ref() else {
            return SessionState::Exiting;
        };
        session.attempts += 1;
        let attempt = session.attempts;

        self.ui.notify(SessionEvent::ProbeStarted);
        let ip = match self.prober.probe_ip().await {
            Ok(ip) => ip,
            Err(e) => {
                warn!(attempt, error = %e, "IP probe failed");
                session.last_result = Some(LoginResult::Failure(FailureReason::IpProbeFailed));
                self.ui.notify(SessionEvent::ProbeFailed(e));
                return SessionState::Idle;
            }
        };
        self.ui.notify(SessionEvent::IpDiscovered(ip.clone()));

        self.ui.notify(SessionEvent::LoginStarted);
        let result = self.dispatcher.login(profile, &ip).await;
        session.last_result = Some(result);
        match result {
            LoginResult::Success => {
                info!(attempt, ip = %ip, "login succeeded");
                self.ui.notify(SessionEvent::LoginSucceeded);
                SessionState::Done
            }
            LoginResult::Failure(reason) => {
                warn!(attempt, ?reason, "login failed");
                self.ui.notify(SessionEvent::LoginFailed(reason));
                SessionState::Idle
            }
        }
    }

    async fn edit_profile(&self, session: &mut Session) -> Result<SessionState, DomainError> {
        if let Some(profile) = self.collect_profile(session.profile.as_ref()).await? {
            session.profile = Some(profile);
            session.changed = true;
        } else {
            debug!("profile edit cancelled");
        }
        Ok(SessionState::Idle)
    }

    /// Prompt until a draft validates or the user cancels.
    async fn collect_profile(
        &self,
        current: Option<&LoginProfile>,
    ) -> Result<Option<LoginProfile>, DomainError> {
        loop {
            let Some(draft) = self.ui.prompt_profile(current).await? else {
                return Ok(None);
            };
            match draft.validate() {
                Ok(profile) => {
                    info!(carrier = %profile.carrier, "profile updated");
                    self.ui.notify(SessionEvent::ProfileUpdated);
                    return Ok(Some(profile));
                }
                Err(problem) => {
                    debug!(%problem, "profile draft rejected");
                    self.ui.notify(SessionEvent::ProfileRejected(problem));
                }
            }
        }
    }

    /// Best-effort save. A failure is reported, never propagated.
    async fn persist_if_changed(&self, session: &Session) -> SaveStatus {
        let Some(profile) = session.profile.as_ref().filter(|_| session.changed) else {
            return SaveStatus::NotNeeded;
        };
        match self.store.try_write(profile).await {
            Ok(()) => {
                self.ui.notify(SessionEvent::ProfileSaved);
                SaveStatus::Saved
            }
            Err(e) => {
                warn!(error = %e, "saving profile failed");
                self.ui.notify(SessionEvent::SaveFailed(e.clone()));
                SaveStatus::Failed(e)
            }
        }
    }
}
