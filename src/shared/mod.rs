//! Cross-cutting settings shared by the binary and the adapters.

pub mod config;

pub use config::AppConfig;
