//! The closed set of tree node kinds.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use super::{Allocation, Instrument, PATH_SEPARATOR};
use crate::codec;
use crate::config::{CodecConfig, RenderConfig};
use crate::error::{FolioError, FolioResult};
use crate::types::Weight;

/// A node of an allocation tree.
///
/// Equality and hashing are structural, so nodes can key maps and sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// A leaf.
    Instrument(Instrument),
    /// An interior node.
    Allocation(Allocation),
}

impl Node {
    /// The instrument's ticker or the allocation's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Instrument(instrument) => instrument.name(),
            Self::Allocation(allocation) => allocation.name(),
        }
    }

    /// Returns true for an instrument.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Instrument(_))
    }

    /// Returns the instrument, if this is one.
    #[must_use]
    pub fn as_instrument(&self) -> Option<&Instrument> {
        match self {
            Self::Instrument(instrument) => Some(instrument),
            Self::Allocation(_) => None,
        }
    }

    /// Returns the allocation, if this is one.
    #[must_use]
    pub fn as_allocation(&self) -> Option<&Allocation> {
        match self {
            Self::Instrument(_) => None,
            Self::Allocation(allocation) => Some(allocation),
        }
    }

    /// Looks up an immediate child and its weight by name.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::NotSliceable` on an instrument, which has no
    /// children.
    pub fn lookup(&self, key: &str) -> FolioResult<Option<(&Node, Weight)>> {
        match self {
            Self::Instrument(instrument) => Err(FolioError::not_sliceable(instrument.ticker())),
            Self::Allocation(allocation) => Ok(allocation.lookup(key)),
        }
    }

    /// Looks up an immediate child by name, dropping its weight.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::NotSliceable` on an instrument.
    pub fn child(&self, key: &str) -> FolioResult<Option<&Node>> {
        Ok(self.lookup(key)?.map(|(child, _)| child))
    }

    /// Walks a `/`-separated path of child names.
    ///
    /// Returns the node reached together with its share of `self`, the
    /// product of the weights along the way. An empty path resolves to
    /// `self` with a weight of one; empty segments are skipped.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::NotSliceable` if the path continues below an
    /// instrument.
    pub fn resolve(&self, path: &str) -> FolioResult<Option<(&Node, Weight)>> {
        let mut current = self;
        let mut share = Weight::ONE;
        for segment in path.split(PATH_SEPARATOR).filter(|s| !s.is_empty()) {
            match current.lookup(segment)? {
                Some((next, weight)) => {
                    current = next;
                    share = share.mul_on_path(weight);
                }
                None => return Ok(None),
            }
        }
        Ok(Some((current, share)))
    }

    /// Walks a `/`-separated path of child names, dropping the share.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::NotSliceable` if the path continues below an
    /// instrument.
    pub fn at_path(&self, path: &str) -> FolioResult<Option<&Node>> {
        Ok(self.resolve(path)?.map(|(node, _)| node))
    }

    /// Number of node levels in this subtree; an instrument has depth one.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Instrument(_) => 1,
            Self::Allocation(allocation) => allocation.depth(),
        }
    }

    /// Decimal places needed by the longest flattened weight below; zero
    /// for an instrument.
    #[must_use]
    pub fn path_scale(&self) -> u32 {
        match self {
            Self::Instrument(_) => 0,
            Self::Allocation(allocation) => allocation.path_scale(),
        }
    }

    /// Renders the subtree at the given indentation level.
    #[must_use]
    pub fn pretty(&self, indent: usize) -> String {
        self.pretty_with(indent, &RenderConfig::default())
    }

    /// Renders the subtree with explicit render settings.
    #[must_use]
    pub fn pretty_with(&self, indent: usize, render: &RenderConfig) -> String {
        match self {
            Self::Instrument(instrument) => instrument.pretty_with(indent, render),
            Self::Allocation(allocation) => allocation.pretty_with(indent, render),
        }
    }

    /// Encodes the subtree as a JSON value.
    #[must_use]
    pub fn to_structured(&self) -> Value {
        codec::encode(self)
    }

    /// Decodes a JSON value with default codec settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNodeType` for a missing or unknown `type`,
    /// `MalformedStructure` for missing or mistyped fields, and any
    /// construction error of the nodes it describes.
    pub fn from_structured(value: &Value) -> FolioResult<Self> {
        codec::decode(value, &CodecConfig::default())
    }

    /// Decodes a JSON value with explicit codec settings.
    ///
    /// # Errors
    ///
    /// As [`Node::from_structured`], plus `DepthExceeded` past
    /// `config.max_depth`.
    pub fn from_structured_with(value: &Value, config: &CodecConfig) -> FolioResult<Self> {
        codec::decode(value, config)
    }

    /// Encodes the subtree as compact JSON text.
    #[must_use]
    pub fn to_text(&self) -> String {
        codec::to_text(self, &CodecConfig::default())
    }

    /// Encodes the subtree as JSON text with explicit codec settings.
    #[must_use]
    pub fn to_text_with(&self, config: &CodecConfig) -> String {
        codec::to_text(self, config)
    }

    /// Decodes JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the text is not JSON, then the errors of
    /// [`Node::from_structured`].
    pub fn from_text(text: &str) -> FolioResult<Self> {
        codec::from_text(text, &CodecConfig::default())
    }

    /// Decodes JSON text with explicit codec settings.
    ///
    /// # Errors
    ///
    /// As [`Node::from_text`], plus `DepthExceeded`.
    pub fn from_text_with(text: &str, config: &CodecConfig) -> FolioResult<Self> {
        codec::from_text(text, config)
    }
}

impl From<Instrument> for Node {
    fn from(instrument: Instrument) -> Self {
        Self::Instrument(instrument)
    }
}

impl From<Allocation> for Node {
    fn from(allocation: Allocation) -> Self {
        Self::Allocation(allocation)
    }
}

impl TryFrom<Node> for Instrument {
    type Error = FolioError;

    fn try_from(node: Node) -> Result<Self, Self::Error> {
        match node {
            Node::Instrument(instrument) => Ok(instrument),
            Node::Allocation(allocation) => Err(FolioError::invalid_node_type(
                Some(codec::TYPE_PORTFOLIO.to_string()),
                format!("'{}' (expected {})", allocation.name(), codec::TYPE_EQUITY),
            )),
        }
    }
}

impl TryFrom<Node> for Allocation {
    type Error = FolioError;

    fn try_from(node: Node) -> Result<Self, Self::Error> {
        match node {
            Node::Allocation(allocation) => Ok(allocation),
            Node::Instrument(instrument) => Err(FolioError::invalid_node_type(
                Some(codec::TYPE_EQUITY.to_string()),
                format!("'{}' (expected {})", instrument.ticker(), codec::TYPE_PORTFOLIO),
            )),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty(0))
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_structured().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_structured(&value).map_err(serde::de::Error::custom)
    }
}
