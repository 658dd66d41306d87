//! Example: listing the last week's completed orders
//!
//! Reads credentials from `EBAY_TRADING_*` environment variables (or an
//! `ebay-trading.{json,toml}` file), fetches every page of `GetOrders` and
//! prints one line per order.
//!
//! ```bash
//! export EBAY_TRADING_USER_ID=my-seller
//! export EBAY_TRADING_TOKEN=...
//! export EBAY_TRADING_AUTH_TYPE=oauth
//! export EBAY_TRADING_EXPIRE=2030-01-01T00:00:00Z
//! export EBAY_TRADING_ENVIRONMENT=sandbox
//! export EBAY_TRADING_EMAIL=me@example.com
//! cargo run -p ebay-trading-infra --example list_orders
//! ```

use anyhow::Context;
use ebay_trading_core::GetOrdersOptions;
use ebay_trading_infra::{init_tracing, EbayClient, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(LogFormat::from_env());

    let client = EbayClient::from_env().context("failed to configure the Trading API client")?;

    let options = GetOrdersOptions { number_of_days: Some(7), ..Default::default() };
    let document = client.get_orders(&options).await.context("GetOrders failed")?;

    let orders = document["GetOrdersResponse"]["OrderArray"]["Order"]
        .as_array()
        .cloned()
        .unwrap_or_default();

    println!("{} order(s) in the last 7 days", orders.len());
    for order in &orders {
        println!(
            "{}  {}  {}",
            order["OrderID"].as_str().unwrap_or("?"),
            order["OrderStatus"].as_str().unwrap_or("?"),
            order["Total"]["#text"].as_str().unwrap_or("-"),
        );
    }

    Ok(())
}
