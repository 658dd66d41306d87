//! # eBay Trading Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-backed HTTP transport
//! - Configuration loading (environment variables, JSON/TOML files)
//! - Logging setup
//! - The ready-to-use [`EbayClient`]
//!
//! ## Architecture
//! - Implements traits defined in `ebay-trading-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod observability;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::ebay::EbayClient;
pub use observability::{init_tracing, LogFormat};
