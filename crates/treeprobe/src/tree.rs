//! Tree construction.
//!
//! [`Tree::new`] eagerly expands a document into one node per reachable
//! sub-value. Nodes live in an arena owned by the tree and borrow their
//! values from the document, so building a tree copies no document data.
//!
//! # Expansion rules
//!
//! - **Mapping**: one [`NodeKind::Entry`] child per entry, carrying the key.
//! - **Sequence**: one [`NodeKind::Element`] child per element, followed by a
//!   [`NodeKind::WholeSequence`] child holding the entire sequence. Probes
//!   for a whole array and probes for its members are both answerable at
//!   the same depth.
//! - **Scalar**: a single [`NodeKind::Leaf`] child wrapping the same value,
//!   so every node has at least one traversable child.
//!
//! Whole-sequence and leaf nodes are terminal.

use crate::error::{ProbeError, Result};
use crate::matcher::CaseSensitivity;
use crate::node::Node;
use crate::requirement::Requirement;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Opaque index of a node within its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);
}

/// How a node came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The document itself.
    Root,
    /// A mapping entry; the node carries its key.
    Entry,
    /// A sequence element.
    Element,
    /// The entire parent sequence, repeated as a single unit.
    WholeSequence,
    /// Terminal placeholder repeating a scalar parent.
    Leaf,
}

/// Construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TreeOptions {
    /// Comparison mode used when a sequence node is checked against a
    /// sequence requirement as a single unit. Element-wise and scalar
    /// comparisons use the requirement's own mode.
    pub case_sensitivity: CaseSensitivity,
}

#[derive(Debug)]
pub(crate) struct Slot<'doc> {
    pub(crate) value: &'doc Value,
    pub(crate) key: Option<&'doc str>,
    pub(crate) kind: NodeKind,
    /// Position within the parent sequence, for `Element` nodes.
    pub(crate) index: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: usize,
    pub(crate) children: Vec<NodeId>,
}

/// A document expanded into a searchable tree.
///
/// The tree is immutable once built. The only mutable state is the
/// requirement log, which sits behind a mutex so a `Tree` can be searched
/// from several threads at once.
#[derive(Debug)]
pub struct Tree<'doc> {
    document: &'doc Value,
    options: TreeOptions,
    slots: Vec<Slot<'doc>>,
    log: Mutex<Vec<(NodeId, Requirement)>>,
}

impl<'doc> Tree<'doc> {
    /// Build a tree with default options.
    ///
    /// Construction and search recurse once per nesting level, so a
    /// document nested deeper than the thread's stack allows will overflow
    /// it. There is no depth cap.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::EmptyDocument`] when `document` is null or an
    /// empty mapping or sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use treeprobe::{Requirement, Tree, Value};
    ///
    /// let doc = Value::from(json!({"dolor": 592, "amet": {"consectetur": "adipiscing"}}));
    /// let tree = Tree::new(&doc).unwrap();
    ///
    /// assert!(tree.require(&Requirement::for_key("consectetur")).is_ok());
    /// assert!(tree.require(&Requirement::for_key("consectetur").within(1)).is_err());
    /// ```
    pub fn new(document: &'doc Value) -> Result<Self> {
        Self::with_options(document, TreeOptions::default())
    }

    /// Build a tree with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::EmptyDocument`] under the same conditions as [`Tree::new`].
    pub fn with_options(document: &'doc Value, options: TreeOptions) -> Result<Self> {
        if document.is_empty() {
            return Err(ProbeError::EmptyDocument);
        }

        let mut tree = Tree {
            document,
            options,
            slots: vec![Slot {
                value: document,
                key: None,
                kind: NodeKind::Root,
                index: 0,
                parent: None,
                depth: 0,
                children: Vec::new(),
            }],
            log: Mutex::new(Vec::new()),
        };
        tree.expand(NodeId::ROOT);

        tracing::debug!(
            target: "treeprobe::tree",
            nodes = tree.slots.len(),
            document = document.type_name(),
            "Built tree"
        );
        Ok(tree)
    }

    /// Attach children to `id` according to its value, recursing into every
    /// entry and element.
    fn expand(&mut self, id: NodeId) {
        let value = self.slots[id.0].value;
        match value {
            Value::Mapping(map) => {
                for (key, child) in map {
                    let child_id = self.attach(id, child, Some(key.as_str()), NodeKind::Entry, 0);
                    self.expand(child_id);
                }
            }
            Value::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    let child_id = self.attach(id, item, None, NodeKind::Element, index);
                    self.expand(child_id);
                }
                self.attach(id, value, None, NodeKind::WholeSequence, 0);
            }
            _ => {
                self.attach(id, value, None, NodeKind::Leaf, 0);
            }
        }
    }

    fn attach(
        &mut self,
        parent: NodeId,
        value: &'doc Value,
        key: Option<&'doc str>,
        kind: NodeKind,
        index: usize,
    ) -> NodeId {
        let id = NodeId(self.slots.len());
        let depth = self.slots[parent.0].depth + 1;
        self.slots.push(Slot {
            value,
            key,
            kind,
            index,
            parent: Some(parent),
            depth,
            children: Vec::new(),
        });
        self.slots[parent.0].children.push(id);
        id
    }

    /// The document this tree was built from.
    pub fn document(&self) -> &'doc Value {
        self.document
    }

    pub fn options(&self) -> TreeOptions {
        self.options
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`: a tree holds at least its root and one child.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn root(&self) -> Node<'_> {
        Node::new(self, NodeId::ROOT)
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.slots.len()).then(|| Node::new(self, id))
    }

    /// Shorthand for `self.root().require(requirement)`.
    ///
    /// # Errors
    ///
    /// See [`Node::require`].
    pub fn require(&self, requirement: &Requirement) -> Result<Node<'_>> {
        self.root().require(requirement)
    }

    /// Every accepted requirement, in registration order, whichever node it
    /// was anchored on.
    pub fn requirements(&self) -> Vec<Requirement> {
        self.lock_log().iter().map(|(_, r)| r.clone()).collect()
    }

    pub(crate) fn slot(&self, id: NodeId) -> &Slot<'doc> {
        &self.slots[id.0]
    }

    pub(crate) fn record(&self, anchor: NodeId, requirement: &Requirement) {
        self.lock_log().push((anchor, requirement.clone()));
    }

    pub(crate) fn requirements_at(&self, anchor: NodeId) -> Vec<Requirement> {
        self.lock_log()
            .iter()
            .filter(|(id, _)| *id == anchor)
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// Entries are pushed whole, so a poisoned lock still guards a valid log.
    fn lock_log(&self) -> MutexGuard<'_, Vec<(NodeId, Requirement)>> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
