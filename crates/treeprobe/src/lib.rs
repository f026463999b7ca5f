//! # treeprobe
//!
//! Structural requirements over nested, dynamically-typed documents.
//!
//! A document (mappings keyed by strings, ordered sequences, and scalars of
//! several widths) is expanded once into a [`Tree`]. Callers then declare
//! [`Requirement`]s, each a (key, value, depth limit, case mode) probe that
//! must be satisfiable somewhere below a node. A satisfied requirement
//! returns the matching [`Node`], which can anchor the next requirement to
//! narrow the search.
//!
//! ## Quick start
//!
//! ```rust
//! use serde_json::json;
//! use treeprobe::{ProbeError, Requirement, Tree, Value};
//!
//! let doc = Value::from(json!({
//!     "dolor": 592,
//!     "amet": {"consectetur": "adipiscing", "fusce": [1, 2, 4, 3]}
//! }));
//! let tree = Tree::new(&doc).unwrap();
//!
//! // Key-only, value-only and combined probes.
//! assert!(tree.require(&Requirement::for_key("consectetur")).is_ok());
//! assert!(tree.require(&Requirement::for_value(vec![4i64, 3, 2, 1])).is_ok());
//!
//! // Chaining narrows the search to the matched node.
//! let amet = tree.require(&Requirement::for_key("amet")).unwrap();
//! let missing = amet.require(&Requirement::for_key("dolor"));
//! assert_eq!(missing.unwrap_err(), ProbeError::NodeNotFound);
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the [`Value`] sum type and conversions into it
//! - [`tree`] — eager tree construction ([`Tree`], [`NodeKind`], [`TreeOptions`])
//! - [`node`] — node handles and the depth-bounded requirement search
//! - [`requirement`] — the [`Requirement`] probe and its validation
//! - [`matcher`] — value equality and the key/value predicate
//! - [`path`] — node locations relative to the root
//! - [`error`] — error types

pub mod error;
pub mod matcher;
pub mod node;
pub mod path;
pub mod requirement;
pub mod tree;
pub mod value;

pub use error::{ProbeError, Result};
pub use matcher::{equals, matches, CaseSensitivity};
pub use node::Node;
pub use path::{Path, Segment};
pub use requirement::Requirement;
pub use tree::{NodeId, NodeKind, Tree, TreeOptions};
pub use value::{Mapping, Value};
