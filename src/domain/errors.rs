//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. Login outcomes are not errors;
//! see `LoginResult`.

use thiserror::Error;

/// Failure to discover the client IP from the portal status page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// Connection failure, timeout, or non-success HTTP status.
    #[error("portal status page unreachable: {0}")]
    Network(String),

    /// Page fetched but no `ss5="<ipv4>"` in it. Usually already online, or the page changed.
    #[error("no client IP found on the portal status page")]
    NotFound,
}

/// Profile persistence failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileStoreError {
    #[error("profile file I/O failed: {0}")]
    Io(String),

    #[error("profile could not be encoded: {0}")]
    Encode(String),
}

#[derive(Error, Debug)]
pub enum DomainError {
    /// The interactive surface itself failed (terminal gone, not a TTY).
    #[error("Interactive UI error: {0}")]
    Ui(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
