//! Macro for implementing Display and FromStr for wire-value enums
//!
//! Configuration values such as the auth type and the environment arrive as
//! free-form strings. This macro gives those enums a single canonical string
//! form and case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use ebay_trading_domain::impl_wire_str_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Marketplace {
//!     Us,
//!     Uk,
//! }
//!
//! impl_wire_str_conversions!(Marketplace {
//!     Us => "us",
//!     Uk => "uk",
//! });
//!
//! assert_eq!("US".parse::<Marketplace>().unwrap(), Marketplace::Us);
//! ```

/// Implements Display and FromStr traits for wire-value enums
///
/// This macro generates:
/// - Display trait: writes the canonical (lowercase) string
/// - FromStr trait: parses case-insensitively, trimming surrounding spaces
///
/// Parse failures return the rejected input unchanged so callers can wrap it
/// in their own error variant.
#[macro_export]
macro_rules! impl_wire_str_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(s.to_string()),
                }
            }
        }
    };
}
