//! Interior nodes: named sub-portfolios with weighted children.

use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::{AllocationBuilder, Instrument, Node, PATH_SEPARATOR};
use crate::config::RenderConfig;
use crate::error::{FolioError, FolioResult};
use crate::types::{total, Weight, MAX_SCALE};

/// A named allocation of 100% of its value among uniquely named children.
///
/// Invariants, checked once at construction:
/// - the child weights sum to exactly one;
/// - no two immediate children share a name;
/// - every flattened weight below it fits the decimal type exactly.
///
/// The value is immutable afterwards, so the name index built at
/// construction never goes stale.
///
/// # Example
///
/// ```rust
/// use folio_core::prelude::*;
///
/// let root = Allocation::builder("Root")
///     .child_str(Instrument::new("AAA")?, "0.5")
///     .child_str(
///         Allocation::builder("Sub")
///             .child_str(Instrument::new("BBB")?, "1")
///             .build()?,
///         "0.5",
///     )
///     .build()?;
///
/// let flat = root.flatten();
/// assert_eq!(flat["Root/Sub/BBB"].to_string(), "0.5");
/// # Ok::<(), FolioError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Allocation {
    name: String,
    children: Vec<(Node, Weight)>,
    children_by_name: HashMap<String, usize>,
    path_scale: u32,
}

impl Allocation {
    /// Creates an allocation from its children and their weights.
    ///
    /// Children keep the order in which they are given.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the weights do not sum to exactly one (`WeightSum`)
    /// - two children share a name (`DuplicateChildName`)
    /// - a product of weights down to some leaf would need more than
    ///   [`MAX_SCALE`] decimal places (`PrecisionExceeded`)
    pub fn new(
        name: impl Into<String>,
        children: impl IntoIterator<Item = (Node, Weight)>,
    ) -> FolioResult<Self> {
        let name = name.into();
        let children: Vec<(Node, Weight)> = children.into_iter().collect();

        let sum = total(children.iter().map(|(_, weight)| weight));
        if sum != Decimal::ONE {
            tracing::debug!(allocation = %name, %sum, "rejected allocation: weights do not sum to 1");
            return Err(FolioError::weight_sum(name, sum));
        }

        let mut children_by_name = HashMap::with_capacity(children.len());
        for (index, (child, _)) in children.iter().enumerate() {
            if children_by_name
                .insert(child.name().to_string(), index)
                .is_some()
            {
                tracing::debug!(allocation = %name, child = child.name(), "rejected allocation: duplicate child");
                return Err(FolioError::duplicate_child(name, child.name()));
            }
        }

        let path_scale = children
            .iter()
            .map(|(child, weight)| weight.scale() + child.path_scale())
            .max()
            .unwrap_or(0);
        if path_scale > MAX_SCALE {
            tracing::debug!(allocation = %name, path_scale, "rejected allocation: flattened weights too precise");
            return Err(FolioError::precision_exceeded(name, path_scale));
        }

        tracing::trace!(allocation = %name, children = children.len(), "built allocation");
        Ok(Self {
            name,
            children,
            children_by_name,
            path_scale,
        })
    }

    /// Creates an allocation from textual weights such as `"0.25"`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWeight` for any weight that does not parse, then the
    /// same errors as [`Allocation::new`].
    pub fn from_text_weights<S: AsRef<str>>(
        name: impl Into<String>,
        children: impl IntoIterator<Item = (Node, S)>,
    ) -> FolioResult<Self> {
        let children = children
            .into_iter()
            .map(|(child, weight)| Ok((child, Weight::parse(weight.as_ref())?)))
            .collect::<FolioResult<Vec<_>>>()?;
        Self::new(name, children)
    }

    /// Starts a fluent builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AllocationBuilder {
        AllocationBuilder::new(name)
    }

    /// Returns the allocation's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the children with their weights, in construction order.
    #[must_use]
    pub fn children(&self) -> &[(Node, Weight)] {
        &self.children
    }

    /// Number of immediate children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Always false for a constructed allocation; an empty one sums to zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Decimal places needed by the longest flattened weight below.
    #[must_use]
    pub fn path_scale(&self) -> u32 {
        self.path_scale
    }

    /// Looks up an immediate child and its weight by name.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<(&Node, Weight)> {
        self.children_by_name.get(key).map(|&index| {
            let (child, weight) = &self.children[index];
            (child, *weight)
        })
    }

    /// Looks up an immediate child by name, dropping its weight.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<&Node> {
        self.lookup(key).map(|(child, _)| child)
    }

    /// Returns true if an immediate child has the given name.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.children_by_name.contains_key(key)
    }

    /// All distinct instruments reachable from this allocation.
    #[must_use]
    pub fn all_leaf_instruments(&self) -> HashSet<&Instrument> {
        let mut leaves = HashSet::new();
        for (child, _) in &self.children {
            match child {
                Node::Instrument(instrument) => {
                    leaves.insert(instrument);
                }
                Node::Allocation(allocation) => {
                    leaves.extend(allocation.all_leaf_instruments());
                }
            }
        }
        leaves
    }

    /// Flattens the tree into leaf paths and their share of this allocation.
    ///
    /// Keys are `/`-joined names from this allocation down to the ticker,
    /// e.g. `Root/Sub/BBB`. Each value is the product of the weights along
    /// the path, so the values sum to exactly one.
    ///
    /// Names are not escaped: a name containing `/` yields an ambiguous
    /// path, and colliding paths keep the last entry.
    #[must_use]
    pub fn flatten(&self) -> BTreeMap<String, Weight> {
        let mut flat = BTreeMap::new();
        for (child, weight) in &self.children {
            match child {
                Node::Instrument(instrument) => {
                    flat.insert(self.child_path(instrument.ticker()), *weight);
                }
                Node::Allocation(allocation) => {
                    for (sub_path, sub_weight) in allocation.flatten() {
                        flat.insert(self.child_path(&sub_path), weight.mul_on_path(sub_weight));
                    }
                }
            }
        }
        flat
    }

    fn child_path(&self, rest: &str) -> String {
        format!("{}{}{}", self.name, PATH_SEPARATOR, rest)
    }

    /// Total share of each distinct instrument, summed over every path
    /// that reaches it.
    #[must_use]
    pub fn exposures(&self) -> BTreeMap<&Instrument, Decimal> {
        let mut exposures: BTreeMap<&Instrument, Decimal> = BTreeMap::new();
        for (child, weight) in &self.children {
            match child {
                Node::Instrument(instrument) => {
                    *exposures.entry(instrument).or_default() += weight.as_decimal();
                }
                Node::Allocation(allocation) => {
                    for (instrument, share) in allocation.exposures() {
                        *exposures.entry(instrument).or_default() += weight.as_decimal() * share;
                    }
                }
            }
        }
        exposures
    }

    /// Number of node levels below and including this one.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|(child, _)| child.depth())
            .max()
            .unwrap_or(0)
    }

    /// Number of leaf positions, counting an instrument once per path.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.children
            .iter()
            .map(|(child, _)| match child {
                Node::Instrument(_) => 1,
                Node::Allocation(allocation) => allocation.leaf_count(),
            })
            .sum()
    }

    /// Renders the allocation and its subtree at the given indentation level.
    #[must_use]
    pub fn pretty(&self, indent: usize) -> String {
        self.pretty_with(indent, &RenderConfig::default())
    }

    /// Renders with explicit render settings.
    ///
    /// Children are rendered two levels deeper than the header, each
    /// followed by `: <weight>`.
    #[must_use]
    pub fn pretty_with(&self, indent: usize, render: &RenderConfig) -> String {
        let pad = render.pad(indent);
        let mut out = format!("{}Allocation(name='{}', children={{\n", pad, self.name);
        for (child, weight) in &self.children {
            out.push_str(&child.pretty_with(indent + 2, render));
            out.push_str(&format!(": {}\n", weight));
        }
        out.push_str(&pad);
        out.push_str("})");
        out
    }

    /// Encodes the allocation as a `PORTFOLIO` document.
    #[must_use]
    pub fn to_structured(&self) -> Value {
        crate::codec::encode_allocation(self)
    }

    /// Decodes a `PORTFOLIO` document.
    ///
    /// # Errors
    ///
    /// Returns the decode errors of [`Node::from_structured`], or
    /// `InvalidNodeType` if the document is an instrument.
    pub fn from_structured(value: &Value) -> FolioResult<Self> {
        Node::from_structured(value)?.try_into()
    }

    /// Decodes a `PORTFOLIO` document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Node::from_text`], or `InvalidNodeType` if
    /// the document is an instrument.
    pub fn from_text(text: &str) -> FolioResult<Self> {
        Node::from_text(text)?.try_into()
    }

    /// Encodes the allocation as compact JSON text.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.to_structured().to_string()
    }

    fn entries_by_name(&self) -> Vec<&(Node, Weight)> {
        let mut entries: Vec<_> = self.children.iter().collect();
        entries.sort_by(|a, b| a.0.name().cmp(b.0.name()));
        entries
    }
}

// Children form a mapping, so equality ignores their order.
impl PartialEq for Allocation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.children.len() == other.children.len()
            && self.children.iter().all(|(child, weight)| {
                other
                    .lookup(child.name())
                    .is_some_and(|(other_child, other_weight)| {
                        other_child == child && other_weight == *weight
                    })
            })
    }
}

impl Eq for Allocation {}

impl Hash for Allocation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.children.len().hash(state);
        for (child, weight) in self.entries_by_name() {
            child.hash(state);
            weight.hash(state);
        }
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty(0))
    }
}
