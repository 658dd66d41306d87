//! eBay Trading API integration
//!
//! Wires the core [`TradingService`](ebay_trading_core::TradingService) to the
//! reqwest-backed [`HttpClient`](crate::http::HttpClient).

pub mod client;

pub use client::EbayClient;
