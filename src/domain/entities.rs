//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/terminal types here; adapters map into these.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Carrier (account realm) a login profile belongs to. Selects the request shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarrierKind {
    TelecomA,
    MobileB,
    UnicomC,
    CampusD,
}

impl CarrierKind {
    pub const ALL: [CarrierKind; 4] = [
        CarrierKind::TelecomA,
        CarrierKind::MobileB,
        CarrierKind::UnicomC,
        CarrierKind::CampusD,
    ];

    /// Human-readable label used by the menu and profile summary.
    pub fn label(self) -> &'static str {
        match self {
            CarrierKind::TelecomA => "China Telecom",
            CarrierKind::MobileB => "China Mobile",
            CarrierKind::UnicomC => "China Unicom",
            CarrierKind::CampusD => "Campus network",
        }
    }
}

impl fmt::Display for CarrierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Credentials for one portal account. Owned by the session controller for a run.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginProfile {
    pub carrier: CarrierKind,
    pub account: String,
    pub password: String,
}

impl LoginProfile {
    pub fn new(carrier: CarrierKind, account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            carrier,
            account: account.into(),
            password: password.into(),
        }
    }

    /// Password replaced by `*` of the same length, for display.
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }
}

// Password is masked in Debug output.
impl fmt::Debug for LoginProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginProfile")
            .field("carrier", &self.carrier)
            .field("account", &self.account)
            .field("password", &self.masked_password())
            .finish()
    }
}

/// Raw profile input from the interactive surface, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub carrier: Option<CarrierKind>,
    pub account: String,
    pub password: String,
}

/// Why a draft could not become a `LoginProfile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftProblem {
    MissingCarrier,
    EmptyAccount,
    EmptyPassword,
}

impl fmt::Display for DraftProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftProblem::MissingCarrier => f.write_str("no carrier selected"),
            DraftProblem::EmptyAccount => f.write_str("account must not be empty"),
            DraftProblem::EmptyPassword => f.write_str("password must not be empty"),
        }
    }
}

impl ProfileDraft {
    /// Carrier, a non-blank account and a non-empty password are required.
    /// The password is otherwise kept verbatim (no trimming).
    pub fn validate(self) -> Result<LoginProfile, DraftProblem> {
        let carrier = self.carrier.ok_or(DraftProblem::MissingCarrier)?;
        let account = self.account.trim();
        if account.is_empty() {
            return Err(DraftProblem::EmptyAccount);
        }
        if self.password.is_empty() {
            return Err(DraftProblem::EmptyPassword);
        }
        Ok(LoginProfile::new(carrier, account, self.password))
    }
}

/// IPv4 address the portal assigned for this session. Re-probed every attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(String);

impl ClientIp {
    pub fn new(ip: impl Into<String>) -> Self {
        Self(ip.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one login attempt. Consumed immediately by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginResult {
    Success,
    Failure(FailureReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    IpProbeFailed,
    NetworkError,
    InvalidCredentials,
    UnsupportedCarrier,
    ProtocolError,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FailureReason::IpProbeFailed => "could not discover the client IP from the portal",
            FailureReason::NetworkError => "the portal could not be reached",
            FailureReason::InvalidCredentials => {
                "the portal rejected the account or password (or the client is already online)"
            }
            FailureReason::UnsupportedCarrier => "login for this carrier is not supported yet",
            FailureReason::ProtocolError => "the portal returned an unrecognized response",
        };
        f.write_str(text)
    }
}

/// The three choices offered by the idle menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    LoginOrRetry,
    EditProfile,
    Exit,
}
