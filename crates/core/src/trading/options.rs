//! Typed option builders
//!
//! Every facade method accepts any `Serialize` value as options. These
//! structs cover the commonly used fields of each call and serialize to the
//! vendor's element names; unset fields are left out of the envelope.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Options for `GetSellerList`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSellerListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time_to: Option<DateTime<Utc>>,
    /// `Coarse`, `Medium` or `Fine`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity_level: Option<String>,
    #[serde(rename = "UserID", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Options for `GetOrders`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetOrdersOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time_to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mod_time_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mod_time_to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_days: Option<u32>,
}

/// Options for `GetUser`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetUserOptions {
    #[serde(rename = "UserID", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "ItemID", skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
}

/// Options for `CompleteSale`. `OrderLineItemID` and `Shipment` are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompleteSaleOptions {
    #[serde(rename = "OrderLineItemID")]
    pub order_line_item_id: String,
    #[serde(rename = "ItemID", skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(rename = "TransactionID", skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(rename = "OrderID", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped: Option<bool>,
    pub shipment: Shipment,
}

impl CompleteSaleOptions {
    pub fn new(order_line_item_id: impl Into<String>, shipment: Shipment) -> Self {
        Self {
            order_line_item_id: order_line_item_id.into(),
            item_id: None,
            transaction_id: None,
            order_id: None,
            paid: None,
            shipped: None,
            shipment,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Shipment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_tracking_details: Option<ShipmentTrackingDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped_time: Option<DateTime<Utc>>,
}

impl Shipment {
    pub fn tracked(carrier: impl Into<String>, tracking_number: impl Into<String>) -> Self {
        Self {
            shipment_tracking_details: Some(ShipmentTrackingDetails {
                shipping_carrier_used: carrier.into(),
                shipment_tracking_number: tracking_number.into(),
            }),
            shipped_time: None,
        }
    }

    pub fn shipped_at(mut self, at: DateTime<Utc>) -> Self {
        self.shipped_time = Some(at);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentTrackingDetails {
    pub shipping_carrier_used: String,
    pub shipment_tracking_number: String,
}
