//! Call catalogue
//!
//! Each supported Trading API call is described by a static [`CallSpec`]:
//! its name, the envelope defaults it always sends, the option fields it
//! requires, the response paths that always decode to sequences, and whether
//! its results are paged.

use ebay_trading_domain::{Result, TradingError};
use serde_json::Value;

use super::response::ResponseSchema;

/// Shape a required option field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// Non-blank string or number
    Text,
    /// Nested object
    Object,
}

/// Option field a call cannot be sent without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredField {
    /// Element name, e.g. `OrderLineItemID`
    pub name: &'static str,
    /// Shape the value must have.
    pub shape: FieldShape,
}

/// Paging parameters of a paginated call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    /// `EntriesPerPage` sent with every page.
    pub entries_per_page: u32,
    /// Dotted path of the paged collection below the response root.
    pub list_path: &'static str,
}

/// Static description of one Trading API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSpec {
    /// Vendor call name, sent in `X-EBAY-API-CALL-NAME` and used for the
    /// envelope roots.
    pub name: &'static str,
    /// Envelope fields sent ahead of caller options, in this order.
    pub defaults: &'static [(&'static str, &'static str)],
    /// Fields checked before the first request.
    pub required: &'static [RequiredField],
    /// Response paths that always decode to sequences.
    pub repeatable: &'static [&'static str],
    /// Present for calls that are aggregated over every page.
    pub pagination: Option<PageSpec>,
}

/// Every listing of the seller, 200 per page.
pub const GET_SELLER_LIST: CallSpec = CallSpec {
    name: "GetSellerList",
    defaults: &[],
    required: &[],
    repeatable: &[
        "ItemArray.Item",
        "ItemArray.Item.PictureDetails.PictureURL",
        "ItemArray.Item.ShippingDetails.ShippingServiceOptions",
    ],
    pagination: Some(PageSpec { entries_per_page: 200, list_path: "ItemArray.Item" }),
};

/// Completed orders where the account is the seller, 100 per page.
pub const GET_ORDERS: CallSpec = CallSpec {
    name: "GetOrders",
    defaults: &[("WarningLevel", "High"), ("OrderRole", "Seller"), ("OrderStatus", "Completed")],
    required: &[],
    repeatable: &[
        "OrderArray.Order",
        "OrderArray.Order.TransactionArray.Transaction",
        "OrderArray.Order.ExternalTransaction",
        "OrderArray.Order.PaymentHoldDetails.RequiredSellerActionArray.RequiredSellerAction",
    ],
    pagination: Some(PageSpec { entries_per_page: 100, list_path: "OrderArray.Order" }),
};

/// Account details of a user, single request.
pub const GET_USER: CallSpec = CallSpec {
    name: "GetUser",
    defaults: &[("DetailLevel", "ReturnAll")],
    required: &[],
    repeatable: &[],
    pagination: None,
};

/// Shipment and payment status update for one order line item.
pub const COMPLETE_SALE: CallSpec = CallSpec {
    name: "CompleteSale",
    defaults: &[("ErrorLanguage", "en_US"), ("WarningLevel", "High")],
    required: &[
        RequiredField { name: "OrderLineItemID", shape: FieldShape::Text },
        RequiredField { name: "Shipment", shape: FieldShape::Object },
    ],
    repeatable: &[],
    pagination: None,
};

impl CallSpec {
    /// Response schema for this call; `Errors` is repeatable for every call.
    pub fn schema(&self) -> ResponseSchema {
        ResponseSchema::new(self.repeatable.iter().copied().chain(std::iter::once("Errors")))
    }

    /// Check the options value against this call's contract.
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidOptions`] when `options` is neither an
    /// object nor null, or a required field is missing or mis-shaped.
    pub fn validate_options(&self, options: &Value) -> Result<()> {
        let empty = serde_json::Map::new();
        let fields = match options {
            Value::Null => &empty,
            Value::Object(fields) => fields,
            other => {
                return Err(TradingError::InvalidOptions(format!(
                    "{} expects an options object, got {}",
                    self.name,
                    value_kind(other)
                )))
            }
        };

        for field in self.required {
            let present = match (fields.get(field.name), field.shape) {
                (Some(Value::String(s)), FieldShape::Text) => !s.trim().is_empty(),
                (Some(Value::Number(_)), FieldShape::Text) => true,
                (Some(Value::Object(_)), FieldShape::Object) => true,
                _ => false,
            };

            if !present {
                let expected = match field.shape {
                    FieldShape::Text => "a non-empty value",
                    FieldShape::Object => "an object",
                };
                return Err(TradingError::InvalidOptions(format!(
                    "{} requires {} to be {}",
                    self.name, field.name, expected
                )));
            }
        }

        Ok(())
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
