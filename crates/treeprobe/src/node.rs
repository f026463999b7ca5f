//! Node handles and requirement search.
//!
//! A [`Node`] is a cheap, copyable handle into a [`Tree`]. Requirements are
//! matched with a depth-first, pre-order walk below the node the requirement
//! is registered on; the first node that satisfies it wins. A matched node
//! can anchor the next requirement, narrowing the search step by step:
//!
//! ```
//! use serde_json::json;
//! use treeprobe::{Requirement, Tree, Value};
//!
//! let doc = Value::from(json!({
//!     "manufacturer": "Cigar City",
//!     "attributes": {"manufacturedIn": {"US": ["Gulf coast", "FL", "Tampa"]}}
//! }));
//! let tree = Tree::new(&doc).unwrap();
//!
//! let us = tree.require(&Requirement::for_key("US")).unwrap();
//! let tampa = us.require(&Requirement::for_value("TAMPA").within(2).case_insensitive());
//! assert!(tampa.is_ok());
//! ```

use crate::error::{ProbeError, Result};
use crate::matcher::{matches, CaseSensitivity};
use crate::path::{Path, Segment};
use crate::requirement::Requirement;
use crate::tree::{NodeId, NodeKind, Slot, Tree};
use crate::value::Value;
use std::fmt;

/// A position in a [`Tree`].
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t Tree<'t>,
    id: NodeId,
}

impl<'t> Node<'t> {
    pub(crate) fn new(tree: &'t Tree<'t>, id: NodeId) -> Self {
        Node { tree, id }
    }

    fn slot(&self) -> &'t Slot<'t> {
        self.tree.slot(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t Tree<'t> {
        self.tree
    }

    /// The mapping key that produced this node, if any.
    pub fn key(&self) -> Option<&'t str> {
        self.slot().key
    }

    pub fn value(&self) -> &'t Value {
        self.slot().value
    }

    pub fn kind(&self) -> NodeKind {
        self.slot().kind
    }

    /// Distance from the tree root. The root is at depth 0.
    pub fn depth(&self) -> usize {
        self.slot().depth
    }

    pub fn is_root(&self) -> bool {
        self.slot().parent.is_none()
    }

    /// Comparison mode this node applies when a sequence requirement is
    /// checked against its whole value.
    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.tree.options().case_sensitivity
    }

    pub fn parent(&self) -> Option<Node<'t>> {
        self.slot().parent.map(|id| Node::new(self.tree, id))
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'t>> + 't {
        let tree = self.tree;
        self.slot()
            .children
            .iter()
            .map(move |&id| Node::new(tree, id))
    }

    /// Segments from the root down to this node.
    pub fn path(&self) -> Path {
        let mut segments = Vec::with_capacity(self.depth());
        let mut current = *self;
        while let Some(parent) = current.parent() {
            let slot = current.slot();
            segments.push(match slot.kind {
                NodeKind::Entry => Segment::Key(slot.key.unwrap_or_default().to_owned()),
                NodeKind::Element => Segment::Index(slot.index),
                NodeKind::WholeSequence => Segment::Whole,
                NodeKind::Leaf | NodeKind::Root => Segment::Leaf,
            });
            current = parent;
        }
        segments.reverse();
        Path::from_segments(segments)
    }

    /// Requirements that were accepted with this node as their anchor.
    pub fn requirements(&self) -> Vec<Requirement> {
        self.tree.requirements_at(self.id)
    }

    /// Find the first descendant satisfying `requirement`.
    ///
    /// The requirement is validated first; an invalid requirement is
    /// rejected without searching or being logged. A valid one is appended
    /// to the tree's requirement log, then the descendants are walked
    /// depth-first, starting with the direct children at depth 1.
    ///
    /// # Errors
    ///
    /// - [`ProbeError::InvalidRequirement`] if validation fails.
    /// - [`ProbeError::NodeNotFound`] if no descendant within
    ///   `requirement.max_depth` matches.
    pub fn require(&self, requirement: &Requirement) -> Result<Node<'t>> {
        requirement.validate()?;
        self.tree.record(self.id, requirement);

        let mut visited = 0usize;
        match self.search(requirement, 1, &mut visited) {
            Some((found, depth)) => {
                tracing::debug!(
                    target: "treeprobe::search",
                    key = %requirement.key,
                    max_depth = requirement.max_depth,
                    depth,
                    visited,
                    path = %found.path(),
                    "Requirement satisfied"
                );
                Ok(found)
            }
            None => {
                tracing::debug!(
                    target: "treeprobe::search",
                    key = %requirement.key,
                    max_depth = requirement.max_depth,
                    visited,
                    anchor = %self.path(),
                    "Requirement not found"
                );
                Err(ProbeError::NodeNotFound)
            }
        }
    }

    /// Apply requirements in order, each anchored on the previous match.
    ///
    /// Stops at the first failure. An empty slice returns this node.
    ///
    /// # Errors
    ///
    /// The first error returned by [`Node::require`].
    pub fn require_all(&self, requirements: &[Requirement]) -> Result<Node<'t>> {
        requirements
            .iter()
            .try_fold(*self, |anchor, requirement| anchor.require(requirement))
    }

    /// Pre-order walk of the children of `self`, which sit at `depth`.
    fn search(
        &self,
        requirement: &Requirement,
        depth: usize,
        visited: &mut usize,
    ) -> Option<(Node<'t>, usize)> {
        for child in self.children() {
            *visited += 1;
            if child.satisfies(requirement) {
                return Some((child, depth));
            }
            if requirement.reaches(depth + 1) {
                if let Some(found) = child.search(requirement, depth + 1, visited) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Apply the key/value predicate to this node.
    ///
    /// A sequence node meets a sequence requirement as a single unit, under
    /// the node's own case mode. Against any other requirement, key-only
    /// included, the sequence is a pool and one element must satisfy it
    /// under the requirement's mode. An empty sequence never matches.
    fn satisfies(&self, requirement: &Requirement) -> bool {
        let key = self.key();
        let value = self.value();
        match (value, requirement.expected_value()) {
            (Value::Sequence(_), Some(want @ Value::Sequence(_))) => {
                matches(key, &requirement.key, value, Some(want), self.case_sensitivity())
            }
            (Value::Sequence(items), want) => items.iter().any(|item| {
                matches(key, &requirement.key, item, want, requirement.case_sensitivity)
            }),
            (_, want) => matches(key, &requirement.key, value, want, requirement.case_sensitivity),
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("path", &self.path().to_string())
            .field("kind", &self.kind())
            .field("key", &self.key())
            .field("value", self.value())
            .finish()
    }
}
