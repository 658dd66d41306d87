//! External service integrations

pub mod ebay;
