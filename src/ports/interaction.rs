//! Interaction port. The session controller drives the user through it.
//!
//! Rendering, prompts and wording belong to the adapter; the controller only
//! supplies data and consumes choices.

use crate::domain::{
    ClientIp, DomainError, DraftProblem, FailureReason, LoginProfile, ProbeError, ProfileDraft,
    ProfileStoreError, UserAction,
};

/// Something the controller wants the user to know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// No stored profile; creation flow is about to start.
    ProfileMissing,
    /// A draft was rejected; the prompt will be shown again.
    ProfileRejected(DraftProblem),
    ProfileUpdated,
    ProbeStarted,
    IpDiscovered(ClientIp),
    ProbeFailed(ProbeError),
    LoginStarted,
    LoginSucceeded,
    LoginFailed(FailureReason),
    ProfileSaved,
    SaveFailed(ProfileStoreError),
}

#[async_trait::async_trait]
pub trait InteractionPort: Send + Sync {
    /// Show the current profile and the idle menu; return the chosen action.
    async fn choose_action(&self, profile: &LoginProfile) -> Result<UserAction, DomainError>;

    /// Ask for carrier, account and password. `current` pre-fills an edit.
    /// `Ok(None)` means the user cancelled.
    async fn prompt_profile(
        &self,
        current: Option<&LoginProfile>,
    ) -> Result<Option<ProfileDraft>, DomainError>;

    fn notify(&self, event: SessionEvent);
}
