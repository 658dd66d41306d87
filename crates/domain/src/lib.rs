//! # eBay Trading Domain
//!
//! Domain types for the eBay Trading API client.
//!
//! This crate contains:
//! - The credential model (validation, expiry, auth headers)
//! - Client configuration structures
//! - The error type and Result alias
//! - Protocol constants
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod credential;
pub mod errors;
pub mod macros;

// Re-export commonly used items
pub use config::*;
pub use credential::{AppConfig, AuthScheme, AuthType, Credential, CredentialConfig, Environment};
pub use errors::*;
