//! Response normalizer
//!
//! Decodes Trading API XML into a `serde_json::Value` tree of the form
//! `{"<Call>Response": {...}}`:
//!
//! - an element holding only text becomes a string, untrimmed and never
//!   type-coerced
//! - an element with children or attributes becomes an object
//! - attributes are stored as `@name`, text next to them as `#text`
//! - whitespace between child elements is formatting and is dropped
//! - an empty element becomes an empty string
//! - a name repeated under one parent becomes an array, in document order
//! - a path declared in the [`ResponseSchema`] is always an array, even for a
//!   single occurrence
//!
//! `xmlns` declarations are dropped.

use std::collections::BTreeSet;

use ebay_trading_domain::{ApiErrorDetail, Result, TradingError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};
use tracing::warn;

/// Paths (dotted, relative to the response root) that always decode to
/// sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSchema {
    repeatable: BTreeSet<String>,
}

impl ResponseSchema {
    /// Schema from dotted paths such as `OrderArray.Order`.
    pub fn new<'a>(paths: impl IntoIterator<Item = &'a str>) -> Self {
        Self { repeatable: paths.into_iter().map(str::to_string).collect() }
    }

    /// True when `path` always decodes to a sequence.
    pub fn is_repeatable(&self, path: &str) -> bool {
        self.repeatable.contains(path)
    }
}

struct Frame {
    name: String,
    path: String,
    fields: Map<String, Value>,
    text: String,
    has_children: bool,
}

impl Frame {
    fn open(start: &BytesStart<'_>, parent: Option<&Frame>) -> Result<Self> {
        let name = String::from_utf8(start.name().as_ref().to_vec())
            .map_err(|e| TradingError::Parse(format!("element name is not UTF-8: {e}")))?;

        let path = match parent {
            None => String::new(),
            Some(parent) if parent.path.is_empty() => name.clone(),
            Some(parent) => format!("{}.{}", parent.path, name),
        };

        let mut fields = Map::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| TradingError::Parse(e.to_string()))?;
            let key = String::from_utf8(attribute.key.as_ref().to_vec())
                .map_err(|e| TradingError::Parse(format!("attribute name is not UTF-8: {e}")))?;
            if key == "xmlns" || key.starts_with("xmlns:") {
                continue;
            }
            let value =
                attribute.unescape_value().map_err(|e| TradingError::Parse(e.to_string()))?;
            fields.insert(format!("@{key}"), Value::String(value.into_owned()));
        }

        Ok(Self { name, path, fields, text: String::new(), has_children: false })
    }

    fn into_value(self) -> Value {
        // Next to child elements, text is either indentation or mixed content.
        let text = if self.has_children { self.text.trim().to_string() } else { self.text };

        if self.fields.is_empty() {
            return Value::String(text);
        }

        let mut fields = self.fields;
        if !text.is_empty() {
            fields.insert("#text".to_string(), Value::String(text));
        }
        Value::Object(fields)
    }
}

/// Decode a response body.
///
/// # Errors
/// Returns [`TradingError::Parse`] when the input is not a single well-formed
/// XML element tree.
pub fn parse_response(xml: &str, schema: &ResponseSchema) -> Result<Value> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            TradingError::Parse(format!("{e} at byte {}", reader.buffer_position()))
        })?;

        match event {
            Event::Start(start) => {
                ensure_single_root(&stack, &root)?;
                let frame = Frame::open(&start, stack.last())?;
                stack.push(frame);
            }
            Event::Empty(start) => {
                ensure_single_root(&stack, &root)?;
                let frame = Frame::open(&start, stack.last())?;
                close(frame, &mut stack, &mut root, schema);
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| TradingError::Parse("unexpected closing tag".to_string()))?;
                close(frame, &mut stack, &mut root, schema);
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| TradingError::Parse(e.to_string()))?;
                append_text(&mut stack, &text)?;
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                let text = std::str::from_utf8(&bytes)
                    .map_err(|e| TradingError::Parse(format!("CDATA is not UTF-8: {e}")))?;
                append_text(&mut stack, text)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(TradingError::Parse(format!("unclosed element <{}>", open.name)));
    }

    let (name, value) =
        root.ok_or_else(|| TradingError::Parse("document has no root element".to_string()))?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

fn ensure_single_root(stack: &[Frame], root: &Option<(String, Value)>) -> Result<()> {
    if stack.is_empty() && root.is_some() {
        return Err(TradingError::Parse("document has more than one root element".to_string()));
    }
    Ok(())
}

fn append_text(stack: &mut [Frame], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(frame) => {
            frame.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(TradingError::Parse("text outside the root element".to_string())),
    }
}

fn close(
    frame: Frame,
    stack: &mut [Frame],
    root: &mut Option<(String, Value)>,
    schema: &ResponseSchema,
) {
    let repeatable = schema.is_repeatable(&frame.path);
    let name = frame.name.clone();
    let value = frame.into_value();

    match stack.last_mut() {
        Some(parent) => {
            parent.has_children = true;
            insert_child(&mut parent.fields, name, value, repeatable);
        }
        None => *root = Some((name, value)),
    }
}

fn insert_child(fields: &mut Map<String, Value>, name: String, value: Value, repeatable: bool) {
    match fields.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None if repeatable => {
            fields.insert(name, Value::Array(vec![value]));
        }
        None => {
            fields.insert(name, value);
        }
    }
}

/// Body of a decoded response: the value under `<Call>Response`.
pub fn response_body<'a>(document: &'a Value, call_name: &str) -> Option<&'a Value> {
    document.get(format!("{call_name}Response"))
}

/// Inspect the vendor acknowledgement of a decoded response.
///
/// `Failure` becomes [`TradingError::Api`] carrying the response's `Errors`;
/// `Warning` and `PartialFailure` are logged and let through.
///
/// # Errors
/// Returns [`TradingError::Api`] when `Ack` is `Failure`.
pub fn check_ack(call_name: &str, document: &Value) -> Result<()> {
    let Some(body) = response_body(document, call_name) else {
        return Ok(());
    };

    match body.get("Ack").and_then(Value::as_str) {
        Some("Failure") => {
            Err(TradingError::Api { call: call_name.to_string(), errors: error_details(body) })
        }
        Some(ack @ ("Warning" | "PartialFailure")) => {
            let details = error_details(body);
            warn!(
                call = call_name,
                ack,
                messages = %details.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "),
                "Trading API call completed with warnings"
            );
            Ok(())
        }
        _ => Ok(()),
    }
}

fn error_details(body: &Value) -> Vec<ApiErrorDetail> {
    let entries = match body.get("Errors") {
        Some(Value::Array(entries)) => entries.iter().collect(),
        Some(entry @ Value::Object(_)) => vec![entry],
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .map(|entry| ApiErrorDetail {
            code: text_field(entry, "ErrorCode"),
            short_message: text_field(entry, "ShortMessage"),
            long_message: text_field(entry, "LongMessage"),
            severity: text_field(entry, "SeverityCode"),
        })
        .collect()
}

fn text_field(entry: &Value, name: &str) -> Option<String> {
    entry.get(name).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn orders_schema() -> ResponseSchema {
        ResponseSchema::new(["OrderArray.Order", "Errors"])
    }

    #[test]
    fn single_declared_entry_decodes_to_sequence() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <GetOrdersResponse xmlns="urn:ebay:apis:eBLBaseComponents">
              <Ack>Success</Ack>
              <OrderArray>
                <Order><OrderID>1</OrderID></Order>
              </OrderArray>
            </GetOrdersResponse>"#;

        let document = parse_response(xml, &orders_schema()).unwrap();

        assert_eq!(
            document,
            json!({
                "GetOrdersResponse": {
                    "Ack": "Success",
                    "OrderArray": { "Order": [ { "OrderID": "1" } ] }
                }
            })
        );
    }

    #[test]
    fn undeclared_repeats_still_become_sequences() {
        let xml = "<R><Tag>a</Tag><Tag>b</Tag><Tag>c</Tag><One>x</One></R>";
        let document = parse_response(xml, &ResponseSchema::default()).unwrap();

        assert_eq!(document, json!({"R": {"Tag": ["a", "b", "c"], "One": "x"}}));
    }

    #[test]
    fn attributes_text_and_empty_elements() {
        let xml = r#"<R><Total currencyID="USD">12.50</Total><Note/><Name>A &amp; B</Name><Raw><![CDATA[<b>]]></Raw></R>"#;
        let document = parse_response(xml, &ResponseSchema::default()).unwrap();

        assert_eq!(
            document,
            json!({
                "R": {
                    "Total": { "@currencyID": "USD", "#text": "12.50" },
                    "Note": "",
                    "Name": "A & B",
                    "Raw": "<b>"
                }
            })
        );
    }

    #[test]
    fn leaf_text_keeps_surrounding_whitespace() {
        let xml = "<R>\n  <Title>  padded  </Title>\n  <Blank> </Blank>\n  <Total currencyID=\"USD\"> 1 </Total>\n</R>\n";
        let document = parse_response(xml, &ResponseSchema::default()).unwrap();

        assert_eq!(
            document,
            json!({
                "R": {
                    "Title": "  padded  ",
                    "Blank": " ",
                    "Total": { "@currencyID": "USD", "#text": " 1 " }
                }
            })
        );
    }

    #[test]
    fn malformed_documents_fail_to_parse() {
        let cases = [
            "",
            "not xml at all",
            "<R><A></B></R>",
            "<R><A>",
            "<R/><S/>",
            "</R>",
        ];

        for xml in cases {
            let result = parse_response(xml, &ResponseSchema::default());
            assert!(matches!(result, Err(TradingError::Parse(_))), "{xml:?} -> {result:?}");
        }
    }

    #[test]
    fn failure_ack_surfaces_api_error() {
        let xml = r#"<GetUserResponse>
              <Ack>Failure</Ack>
              <Errors>
                <ShortMessage>Invalid token.</ShortMessage>
                <LongMessage>The auth token is invalid.</LongMessage>
                <ErrorCode>931</ErrorCode>
                <SeverityCode>Error</SeverityCode>
              </Errors>
            </GetUserResponse>"#;
        let document = parse_response(xml, &ResponseSchema::new(["Errors"])).unwrap();

        match check_ack("GetUser", &document) {
            Err(TradingError::Api { call, errors }) => {
                assert_eq!(call, "GetUser");
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].code.as_deref(), Some("931"));
                assert_eq!(errors[0].severity.as_deref(), Some("Error"));
            }
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[test]
    fn warning_and_success_acks_pass() {
        let warning = json!({"GetUserResponse": {"Ack": "Warning", "Errors": [{"ShortMessage": "w"}]}});
        let success = json!({"GetUserResponse": {"Ack": "Success"}});
        let missing = json!({"GetUserResponse": {}});

        assert!(check_ack("GetUser", &warning).is_ok());
        assert!(check_ack("GetUser", &success).is_ok());
        assert!(check_ack("GetUser", &missing).is_ok());
    }
}
