//! Allocation builder for fluent construction.

use super::{Allocation, Node};
use crate::error::{FolioError, FolioResult};
use crate::types::Weight;

/// Builder for constructing an [`Allocation`].
///
/// Weight parse failures are held until [`AllocationBuilder::build`], which
/// reports the first one.
///
/// # Example
///
/// ```rust
/// use folio_core::prelude::*;
///
/// let bonds = Allocation::builder("Bonds")
///     .child_str(Instrument::new("BND")?, "0.6")
///     .child_str(Instrument::new("BNDX")?, "0.4")
///     .build()?;
/// assert_eq!(bonds.len(), 2);
/// # Ok::<(), FolioError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AllocationBuilder {
    name: String,
    children: Vec<(Node, Weight)>,
    error: Option<FolioError>,
}

impl AllocationBuilder {
    /// Creates a builder for an allocation with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            error: None,
        }
    }

    /// Adds a child with an exact weight.
    #[must_use]
    pub fn child(mut self, node: impl Into<Node>, weight: Weight) -> Self {
        self.children.push((node.into(), weight));
        self
    }

    /// Adds a child with a textual weight such as `"0.25"`.
    #[must_use]
    pub fn child_str(mut self, node: impl Into<Node>, weight: &str) -> Self {
        match Weight::parse(weight) {
            Ok(weight) => self.children.push((node.into(), weight)),
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        self
    }

    /// Adds several children at once.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = (Node, Weight)>) -> Self {
        self.children.extend(children);
        self
    }

    /// Builds the allocation.
    ///
    /// # Errors
    ///
    /// Returns the first weight parse error, if any, then the validation
    /// errors of [`Allocation::new`].
    pub fn build(self) -> FolioResult<Allocation> {
        if let Some(e) = self.error {
            return Err(e);
        }
        Allocation::new(self.name, self.children)
    }
}
