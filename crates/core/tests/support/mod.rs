//! Shared test helpers for `ebay-trading-core` integration tests.
//!
//! A scripted transport plus response fixtures, so tests can focus on
//! behaviour instead of XML boilerplate.

#![allow(dead_code)]

pub mod fixtures;
pub mod transport;
