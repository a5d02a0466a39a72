//! Persistence adapters. Implement ProfileStore.

pub mod profile_json;

pub use profile_json::JsonProfileStore;
