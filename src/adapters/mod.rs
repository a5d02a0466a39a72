//! Infrastructure adapters. Implement outbound ports.
//!
//! Portal HTTP, profile file, terminal UI. Map errors to domain types.

pub mod persistence;
pub mod portal;
pub mod ui;
