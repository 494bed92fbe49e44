//! Conversion between nodes and JSON values.
//!
//! ```text
//! {"type": "EQUITY", "ticker": "VTI"}
//! {"type": "PORTFOLIO", "name": "Root", "children": [[<node>, "0.5"], ...]}
//! ```
//!
//! Weights travel as strings so the decimal text survives unchanged.

use serde_json::{json, Map, Value};

use crate::config::CodecConfig;
use crate::error::{FolioError, FolioResult};
use crate::tree::{Allocation, Instrument, Node};
use crate::types::Weight;

/// Discriminant of an instrument document.
pub const TYPE_EQUITY: &str = "EQUITY";

/// Discriminant of an allocation document.
pub const TYPE_PORTFOLIO: &str = "PORTFOLIO";

const FIELD_TYPE: &str = "type";
const FIELD_TICKER: &str = "ticker";
const FIELD_NAME: &str = "name";
const FIELD_CHILDREN: &str = "children";

/// Location of the document root in error contexts.
const ROOT: &str = "$";

/// Encodes a node.
#[must_use]
pub fn encode(node: &Node) -> Value {
    match node {
        Node::Instrument(instrument) => encode_instrument(instrument),
        Node::Allocation(allocation) => encode_allocation(allocation),
    }
}

/// Encodes an instrument.
#[must_use]
pub fn encode_instrument(instrument: &Instrument) -> Value {
    json!({
        FIELD_TYPE: TYPE_EQUITY,
        FIELD_TICKER: instrument.ticker(),
    })
}

/// Encodes an allocation, children in construction order.
#[must_use]
pub fn encode_allocation(allocation: &Allocation) -> Value {
    let children: Vec<Value> = allocation
        .children()
        .iter()
        .map(|(child, weight)| json!([encode(child), weight.to_string()]))
        .collect();

    json!({
        FIELD_TYPE: TYPE_PORTFOLIO,
        FIELD_NAME: allocation.name(),
        FIELD_CHILDREN: children,
    })
}

/// Decodes a node, dispatching on its `type` field.
///
/// # Errors
///
/// - `InvalidNodeType`: `type` missing, not a string, or unknown
/// - `MalformedStructure`: a document that is not an object, or a missing
///   or mistyped field
/// - `InvalidWeight`, `InvalidTicker`, `WeightSum`, `DuplicateChildName`:
///   the document describes an invalid node
/// - `DepthExceeded`: nesting deeper than `config.max_depth`
pub fn decode(value: &Value, config: &CodecConfig) -> FolioResult<Node> {
    let node = decode_node(value, ROOT, 1, config)?;
    tracing::debug!(root = node.name(), depth = node.depth(), "decoded node");
    Ok(node)
}

fn decode_node(value: &Value, at: &str, depth: usize, config: &CodecConfig) -> FolioResult<Node> {
    if depth > config.max_depth {
        return Err(FolioError::DepthExceeded {
            limit: config.max_depth,
        });
    }

    let object = value.as_object().ok_or_else(|| {
        FolioError::malformed(at, format!("expected a node object, found {}", kind(value)))
    })?;

    let type_at = || format!("{}.{}", at, FIELD_TYPE);
    match object.get(FIELD_TYPE) {
        None => Err(FolioError::invalid_node_type(None, type_at())),
        Some(Value::String(node_type)) if node_type == TYPE_EQUITY => {
            decode_instrument(object, at).map(Node::from)
        }
        Some(Value::String(node_type)) if node_type == TYPE_PORTFOLIO => {
            decode_allocation(object, at, depth, config).map(Node::from)
        }
        Some(Value::String(other)) => Err(FolioError::invalid_node_type(
            Some(other.clone()),
            type_at(),
        )),
        Some(other) => Err(FolioError::invalid_node_type(
            Some(other.to_string()),
            type_at(),
        )),
    }
}

fn decode_instrument(object: &Map<String, Value>, at: &str) -> FolioResult<Instrument> {
    let ticker = string_field(object, FIELD_TICKER, at)?;
    Instrument::new(ticker).map_err(|e| match e {
        FolioError::InvalidTicker { reason } => FolioError::InvalidTicker {
            reason: format!("{} at {}.{}", reason, at, FIELD_TICKER),
        },
        other => other,
    })
}

fn decode_allocation(
    object: &Map<String, Value>,
    at: &str,
    depth: usize,
    config: &CodecConfig,
) -> FolioResult<Allocation> {
    let name = string_field(object, FIELD_NAME, at)?;
    let children_at = format!("{}.{}", at, FIELD_CHILDREN);
    let entries = match object.get(FIELD_CHILDREN) {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(FolioError::malformed(
                children_at,
                format!("expected an array, found {}", kind(other)),
            ))
        }
        None => return Err(FolioError::malformed(children_at, "missing field")),
    };

    let mut children = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let entry_at = format!("{}[{}]", children_at, index);
        let pair = match entry.as_array() {
            Some(pair) if pair.len() == 2 => pair,
            _ => {
                return Err(FolioError::malformed(
                    entry_at,
                    format!("expected a [node, weight] pair, found {}", entry),
                ))
            }
        };

        let child = decode_node(&pair[0], &format!("{}[0]", entry_at), depth + 1, config)?;
        let weight_at = format!("{}[1]", entry_at);
        let weight = match &pair[1] {
            Value::String(text) => parse_weight(text, &weight_at)?,
            other => {
                return Err(FolioError::malformed(
                    weight_at,
                    format!("expected a weight string, found {}", kind(other)),
                ))
            }
        };
        children.push((child, weight));
    }

    Allocation::new(name, children)
}

fn string_field<'a>(object: &'a Map<String, Value>, field: &str, at: &str) -> FolioResult<&'a str> {
    match object.get(field) {
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(FolioError::malformed(
            format!("{}.{}", at, field),
            format!("expected a string, found {}", kind(other)),
        )),
        None => Err(FolioError::malformed(format!("{}.{}", at, field), "missing field")),
    }
}

fn parse_weight(text: &str, at: &str) -> FolioResult<Weight> {
    Weight::parse(text).map_err(|e| match e {
        FolioError::InvalidWeight { value, reason } => {
            FolioError::invalid_weight(value, format!("{} at {}", reason, at))
        }
        other => other,
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
