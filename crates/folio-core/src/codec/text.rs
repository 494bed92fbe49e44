//! JSON text encoding on top of the structured form.

use serde::Deserialize;

use crate::config::CodecConfig;
use crate::error::{FolioError, FolioResult};
use crate::tree::Node;

use super::structured;

/// Encodes a node as JSON text, indented when `config.pretty_json` is set.
#[must_use]
pub fn to_text(node: &Node, config: &CodecConfig) -> String {
    let value = structured::encode(node);
    if config.pretty_json {
        format!("{:#}", value)
    } else {
        value.to_string()
    }
}

/// JSON nesting levels one tree level adds: the node object, its
/// `children` array and the `[node, weight]` pair.
const NESTING_PER_LEVEL: usize = 3;

/// Decodes a node from JSON text.
///
/// The parser's own recursion limit is lifted so that any tree within
/// `config.max_depth` survives a text round trip; nesting is bounded by a
/// scan of the raw text instead. Trees deeper than `config.max_depth`
/// still encode, but decoding them needs a larger limit.
///
/// # Errors
///
/// Returns `FolioError::DepthExceeded` if the text nests deeper than
/// `config.max_depth` tree levels allow, `FolioError::ParseError` if the
/// text is not a JSON document, then the errors of [`structured::decode`].
pub fn from_text(text: &str, config: &CodecConfig) -> FolioResult<Node> {
    let nesting_limit = config.max_depth.saturating_mul(NESTING_PER_LEVEL);
    if nesting_depth(text) > nesting_limit {
        tracing::debug!(limit = config.max_depth, "rejected text: nesting too deep");
        return Err(FolioError::DepthExceeded {
            limit: config.max_depth,
        });
    }

    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = serde_json::Value::deserialize(&mut deserializer)
        .and_then(|value| deserializer.end().map(|()| value))
        .map_err(|e| FolioError::parse_error(e.to_string()))?;
    structured::decode(&value, config)
}

/// Deepest array/object nesting in `text`, ignoring brackets inside strings.
fn nesting_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}
