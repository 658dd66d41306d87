//! Trading API call pipeline
//!
//! Envelope building, response normalization, pagination and the client
//! facade that ties them to a [`Transport`](crate::transport_ports::Transport).

pub mod calls;
pub mod envelope;
pub mod options;
pub mod pagination;
pub mod response;
pub mod service;

pub use calls::{
    CallSpec, FieldShape, PageSpec, RequiredField, COMPLETE_SALE, GET_ORDERS, GET_SELLER_LIST,
    GET_USER,
};
pub use envelope::{build_envelope, Pagination};
pub use options::{
    CompleteSaleOptions, GetOrdersOptions, GetSellerListOptions, GetUserOptions, Shipment,
    ShipmentTrackingDetails,
};
pub use pagination::run_paged;
pub use response::{check_ack, parse_response, response_body, ResponseSchema};
pub use service::TradingService;
