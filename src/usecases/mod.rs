//! Application use cases. Orchestrate domain logic via ports.

pub mod carrier_dispatch;
pub mod session_controller;
pub mod single_shot;

#[cfg(test)]
pub(crate) mod fakes;

pub use carrier_dispatch::CarrierDispatcher;
pub use session_controller::{SaveStatus, SessionController, SessionReport, SessionState, Terminal};
pub use single_shot::{SingleShotLogin, SingleShotOutcome};
