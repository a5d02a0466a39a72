//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;

pub use entities::{
    CarrierKind, ClientIp, DraftProblem, FailureReason, LoginProfile, LoginResult, ProfileDraft,
    UserAction,
};
pub use errors::{DomainError, ProbeError, ProfileStoreError};
