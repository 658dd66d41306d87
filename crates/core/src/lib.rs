//! # eBay Trading Core
//!
//! Protocol logic for the eBay Trading API - no infrastructure dependencies.
//!
//! This crate contains:
//! - The call catalogue and option contracts
//! - The XML envelope builder and response normalizer
//! - The pagination aggregator
//! - The [`TradingService`] facade
//! - The [`Transport`] port the facade sends through
//!
//! ## Architecture Principles
//! - Only depends on `ebay-trading-domain`
//! - No HTTP or filesystem code
//! - The network is reached through the [`Transport`] trait

pub mod trading;

// Infrastructure ports
pub mod transport_ports;

pub use trading::{
    CallSpec, CompleteSaleOptions, GetOrdersOptions, GetSellerListOptions, GetUserOptions,
    Pagination, ResponseSchema, Shipment, ShipmentTrackingDetails, TradingService,
};
pub use transport_ports::{Transport, TransportRequest, TransportResponse};
