//! Port traits. API boundaries for the hexagon.
//!
//! - Interaction: the session controller drives the user through it
//! - Outbound: called by application into infrastructure (portal, profile file)

pub mod interaction;
pub mod outbound;

pub use interaction::{InteractionPort, SessionEvent};
pub use outbound::{IpProber, LoginStrategy, ProfileStore};
