//! Locations of nodes relative to the tree root.

use std::fmt;

/// One step from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Into a mapping entry.
    Key(String),
    /// Into a sequence element.
    Index(usize),
    /// Onto the whole-sequence node of a sequence.
    Whole,
    /// Onto the placeholder leaf of a scalar.
    Leaf,
}

/// The segments leading from the root to a node. The root's path is empty.
///
/// Displays in JSON-pointer style: keys are escaped (`~` as `~0`, `/` as
/// `~1`), the whole-sequence step renders as `*` and a leaf step as `$`.
///
/// ```
/// use treeprobe::{Requirement, Tree, Value};
/// use serde_json::json;
///
/// let doc = Value::from(json!({"amet": {"elit": ["donec", {"vel": "sem"}]}}));
/// let tree = Tree::new(&doc).unwrap();
/// let vel = tree.require(&Requirement::for_key("vel")).unwrap();
/// assert_eq!(vel.path().to_string(), "/amet/elit/1/vel");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(Vec<Segment>);

impl Path {
    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        Path(segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            match segment {
                Segment::Key(key) => write!(f, "/{}", key.replace('~', "~0").replace('/', "~1"))?,
                Segment::Index(i) => write!(f, "/{i}")?,
                Segment::Whole => f.write_str("/*")?,
                Segment::Leaf => f.write_str("/$")?,
            }
        }
        Ok(())
    }
}
