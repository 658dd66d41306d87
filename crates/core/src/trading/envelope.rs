//! Request envelope builder
//!
//! Turns a call name and a JSON-shaped options object into the XML body the
//! Trading API expects. The mapping is the inverse of
//! [`parse_response`](super::response::parse_response):
//!
//! - object keys become child elements, in insertion order
//! - arrays repeat the element once per item
//! - `@name` keys become attributes and `#text` becomes the element text
//! - strings, numbers and booleans become text; `null` fields are omitted
//!
//! Field order is fixed: call defaults, then caller options (a caller field
//! that shares a default's name replaces it in place), then the `Pagination`
//! block when paging.

use ebay_trading_domain::constants::XML_NAMESPACE;
use ebay_trading_domain::{Result, TradingError};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::{Map, Value};

use super::calls::value_kind;

const PAGINATION_FIELD: &str = "Pagination";

/// Page cursor appended to paged requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// `EntriesPerPage`
    pub entries_per_page: u32,
    /// `PageNumber`, starting at 1
    pub page_number: u32,
}

impl Pagination {
    fn to_value(self) -> Value {
        let mut block = Map::new();
        block.insert("EntriesPerPage".to_string(), Value::from(self.entries_per_page));
        block.insert("PageNumber".to_string(), Value::from(self.page_number));
        Value::Object(block)
    }
}

/// Build the XML request body for `call_name`.
///
/// # Errors
/// - [`TradingError::InvalidOptions`] when `options` is not an object (or
///   null), or a key is not a valid XML name
/// - [`TradingError::Envelope`] if the XML writer fails
pub fn build_envelope(
    call_name: &str,
    options: &Value,
    defaults: &[(&str, &str)],
    pagination: Option<Pagination>,
) -> Result<String> {
    let caller_fields = match options {
        Value::Null => None,
        Value::Object(fields) => Some(fields),
        other => {
            return Err(TradingError::InvalidOptions(format!(
                "{call_name} expects an options object, got {}",
                value_kind(other)
            )))
        }
    };

    let mut fields = Map::new();
    for (name, value) in defaults {
        fields.insert((*name).to_string(), Value::String((*value).to_string()));
    }
    for (name, value) in caller_fields.into_iter().flatten() {
        if pagination.is_some() && name == PAGINATION_FIELD {
            continue;
        }
        fields.insert(name.clone(), value.clone());
    }
    if let Some(pagination) = pagination {
        fields.insert(PAGINATION_FIELD.to_string(), pagination.to_value());
    }

    let root = format!("{call_name}Request");
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    let mut start = BytesStart::new(root.as_str());
    start.push_attribute(("xmlns", XML_NAMESPACE));
    write(&mut writer, Event::Start(start))?;
    for (name, value) in &fields {
        write_field(&mut writer, name, value)?;
    }
    write(&mut writer, Event::End(BytesEnd::new(root.as_str())))?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| TradingError::Envelope(format!("envelope is not UTF-8: {e}")))
}

fn write_field(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<()> {
    ensure_element_name(name)?;

    match value {
        Value::Null => Ok(()),
        Value::Array(items) => {
            for item in items {
                write_field(writer, name, item)?;
            }
            Ok(())
        }
        Value::Object(fields) => write_object(writer, name, fields),
        scalar => {
            let text = scalar_text(name, scalar)?;
            write(writer, Event::Start(BytesStart::new(name)))?;
            write(writer, Event::Text(BytesText::new(&text)))?;
            write(writer, Event::End(BytesEnd::new(name)))
        }
    }
}

fn write_object(writer: &mut Writer<Vec<u8>>, name: &str, fields: &Map<String, Value>) -> Result<()> {
    let mut start = BytesStart::new(name);
    let mut text = None;
    let mut children = Vec::new();

    for (key, value) in fields {
        if let Some(attribute) = key.strip_prefix('@') {
            ensure_element_name(attribute)?;
            if !value.is_null() {
                let value = scalar_text(key, value)?;
                start.push_attribute((attribute, value.as_str()));
            }
        } else if key == "#text" {
            text = Some(scalar_text(name, value)?);
        } else {
            children.push((key.as_str(), value));
        }
    }

    if text.is_none() && children.is_empty() {
        return write(writer, Event::Empty(start));
    }

    write(writer, Event::Start(start))?;
    if let Some(text) = text {
        write(writer, Event::Text(BytesText::new(&text)))?;
    }
    for (key, value) in children {
        write_field(writer, key, value)?;
    }
    write(writer, Event::End(BytesEnd::new(name)))
}

fn scalar_text(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(TradingError::InvalidOptions(format!(
            "{name} must be a scalar value, got {}",
            value_kind(other)
        ))),
    }
}

fn ensure_element_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid_start && valid_rest && !name.to_ascii_lowercase().starts_with("xml") {
        Ok(())
    } else {
        Err(TradingError::InvalidOptions(format!("'{name}' is not a valid XML element name")))
    }
}

fn write<'a>(writer: &mut Writer<Vec<u8>>, event: Event<'a>) -> Result<()> {
    writer.write_event(event).map_err(|e| TradingError::Envelope(e.to_string()))
}
