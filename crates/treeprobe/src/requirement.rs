//! Requirements: search specifications matched against a tree.
//!
//! A requirement names a key, a value, or both, and optionally limits how far
//! below its anchor node the value may sit. Fields are public so requirements
//! can be written as struct literals; the builder methods cover the common
//! shapes.
//!
//! ```
//! use treeprobe::{CaseSensitivity, Requirement};
//!
//! let literal = Requirement {
//!     key: "manufacturer".into(),
//!     value: Some("Cigar City".into()),
//!     max_depth: 1,
//!     ..Default::default()
//! };
//! let built = Requirement::for_key("manufacturer")
//!     .with_value("Cigar City")
//!     .within(1);
//! assert_eq!(literal, built);
//! assert_eq!(built.case_sensitivity, CaseSensitivity::Sensitive);
//! ```

use crate::error::{ProbeError, Result};
use crate::matcher::CaseSensitivity;
use crate::value::Value;

/// A (key, value, depth limit, case mode) probe.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Requirement {
    /// Key the matched node must carry. Empty means "any node".
    pub key: String,
    /// Value the matched node must equal. `None` (or `Some(Value::Null)`)
    /// makes this a key-only probe.
    pub value: Option<Value>,
    /// Deepest level below the anchor at which the value may sit. Direct
    /// children are depth 1; 0 means unbounded.
    pub max_depth: usize,
    /// Comparison mode for keys and string values.
    pub case_sensitivity: CaseSensitivity,
}

impl Requirement {
    /// A key-only requirement.
    pub fn for_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// A value-only requirement.
    pub fn for_value(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Limit the search to `depth` levels below the anchor (0 = unbounded).
    pub fn within(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_case(mut self, case_sensitivity: CaseSensitivity) -> Self {
        self.case_sensitivity = case_sensitivity;
        self
    }

    pub fn case_insensitive(self) -> Self {
        self.with_case(CaseSensitivity::Insensitive)
    }

    /// The value to compare against, with `Null` folded into "absent".
    pub fn expected_value(&self) -> Option<&Value> {
        self.value.as_ref().filter(|v| !v.is_null())
    }

    /// Check that the requirement asserts something.
    ///
    /// Pure: validating twice yields the same verdict and touches no tree.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidRequirement`] when the key is blank and
    /// the value is absent or null.
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() && self.expected_value().is_none() {
            return Err(ProbeError::InvalidRequirement(
                "a requirement must have a key or a value, or both".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a node `depth` levels below the anchor is within reach.
    pub(crate) fn reaches(&self, depth: usize) -> bool {
        self.max_depth == 0 || depth <= self.max_depth
    }
}
