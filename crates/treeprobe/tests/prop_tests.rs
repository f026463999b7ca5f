//! Property-based tests for tree construction and requirement matching.
//!
//! Strategies generate:
//! - Random documents (nested mappings and sequences of bool, int32, int64,
//!   string and null, up to 3 levels deep)
//! - Random flat mappings with string values, for case-folding checks
//! - Random integer arrays and their permutations, for the array subset law
//! - Nested key chains of known depth, for depth monotonicity
//!
//! Floats are excluded from generated documents: NaN never equals itself,
//! which would make "found" properties depend on the generator.
use proptest::prelude::*;
use treeprobe::{CaseSensitivity, Node, NodeKind, ProbeError, Requirement, Tree, Value};

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::Int32),
        any::<i64>().prop_map(Value::Int64),
        "[a-zA-Z ]{0,10}".prop_map(Value::String),
    ]
}

/// Nested documents; the root is always a non-empty mapping.
fn arb_document() -> impl Strategy<Value = Value> {
    let nested = arb_scalar().prop_recursive(3, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Sequence),
            prop::collection::vec((arb_key(), inner), 0..6)
                .prop_map(|pairs| pairs.into_iter().collect::<Value>()),
        ]
    });
    prop::collection::vec((arb_key(), nested), 1..6)
        .prop_map(|pairs| pairs.into_iter().collect::<Value>())
}

/// Flat mapping of mixed-case string values.
fn arb_string_mapping() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((arb_key(), "[a-zA-Z]{1,10}"), 1..8)
}

/// A non-empty integer array together with a permutation of it.
fn arb_array_and_permutation() -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
    prop::collection::vec(-1000i64..1000, 1..10)
        .prop_flat_map(|items| (Just(items.clone()), Just(items).prop_shuffle()))
}

// ============================================================================
// Helpers
// ============================================================================

fn walk<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    out.push(node);
    for child in node.children() {
        walk(child, out);
    }
}

/// Count mapping entries and sequence elements reachable in a value.
fn count_members(value: &Value) -> (usize, usize) {
    match value {
        Value::Mapping(map) => map.values().fold((map.len(), 0), |(e, s), v| {
            let (ce, cs) = count_members(v);
            (e + ce, s + cs)
        }),
        Value::Sequence(items) => items.iter().fold((0, items.len()), |(e, s), v| {
            let (ce, cs) = count_members(v);
            (e + ce, s + cs)
        }),
        _ => (0, 0),
    }
}

/// `{"k0": {"k1": ... {"target": "found"}}}` with `levels` wrapping mappings.
fn nested_chain(levels: usize) -> Value {
    let innermost: Value = [("target", Value::from("found"))].into_iter().collect();
    (0..levels).rev().fold(innermost, |inner, i| {
        [(format!("k{i}"), inner)].into_iter().collect::<Value>()
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Entry and element nodes correspond one-to-one with the document's
    /// mapping entries and sequence elements.
    #[test]
    fn construction_flattens_the_document(doc in arb_document()) {
        let tree = Tree::new(&doc).unwrap();
        let mut nodes = Vec::new();
        walk(tree.root(), &mut nodes);

        let entries = nodes.iter().filter(|n| n.kind() == NodeKind::Entry).count();
        let elements = nodes.iter().filter(|n| n.kind() == NodeKind::Element).count();
        prop_assert_eq!((entries, elements), count_members(&doc));
        prop_assert_eq!(nodes.len(), tree.len());
    }

    /// Building twice from the same document gives the same shape.
    #[test]
    fn construction_is_deterministic(doc in arb_document()) {
        let shape = |tree: &Tree<'_>| {
            let mut nodes = Vec::new();
            walk(tree.root(), &mut nodes);
            nodes
                .into_iter()
                .map(|n| (n.path(), n.kind(), n.value().clone()))
                .collect::<Vec<_>>()
        };
        let first = Tree::new(&doc).unwrap();
        let second = Tree::new(&doc).unwrap();
        prop_assert_eq!(shape(&first), shape(&second));
    }

    /// A key found at depth d is found for every limit >= d (and unbounded)
    /// and missed for every limit < d.
    #[test]
    fn depth_limit_is_monotonic(levels in 0usize..6, limit in 0usize..10) {
        let doc = nested_chain(levels);
        let tree = Tree::new(&doc).unwrap();
        let depth = levels + 1;

        let result = tree.require(&Requirement::for_key("target").within(limit));
        if limit == 0 || limit >= depth {
            let found = result.unwrap();
            prop_assert_eq!(found.depth(), depth);
        } else {
            prop_assert_eq!(result.unwrap_err(), ProbeError::NodeNotFound);
        }
    }

    /// Whatever matches case-sensitively also matches case-insensitively
    /// after changing the case of the key and the string value.
    #[test]
    fn insensitive_match_survives_case_changes(
        pairs in arb_string_mapping(),
        pick in any::<prop::sample::Index>(),
        upper in any::<bool>(),
    ) {
        let doc: Value = pairs.into_iter().collect();
        let tree = Tree::new(&doc).unwrap();
        let mapping = doc.as_mapping().unwrap();
        let (key, value) = mapping.get_index(pick.index(mapping.len())).unwrap();
        let value = value.as_str().unwrap();

        prop_assert!(tree.require(&Requirement::for_key(key.as_str()).with_value(value)).is_ok());

        let transform = |s: &str| if upper { s.to_uppercase() } else { s.to_lowercase() };
        let folded = Requirement::for_key(transform(key.as_str()))
            .with_value(transform(value))
            .with_case(CaseSensitivity::Insensitive);
        prop_assert!(tree.require(&folded).is_ok());
    }

    /// A permutation of an existing array matches; changing any single
    /// element to a value not in the array does not.
    #[test]
    fn array_subset_law(
        (items, shuffled) in arb_array_and_permutation(),
        pick in any::<prop::sample::Index>(),
    ) {
        let doc: Value = [("arr", Value::from(items.clone()))].into_iter().collect();
        let tree = Tree::new(&doc).unwrap();

        prop_assert!(tree.require(&Requirement::for_value(shuffled.clone())).is_ok());

        let mut altered = shuffled;
        let i = pick.index(altered.len());
        altered[i] = 5000;
        prop_assert!(tree.require(&Requirement::for_value(altered)).is_err());
    }

    /// Validation gives the same verdict every time and never touches a tree.
    #[test]
    fn validation_is_idempotent(key in "[ a-z]{0,4}", with_value in any::<bool>()) {
        let requirement = if with_value {
            Requirement::for_key(key).with_value(1i64)
        } else {
            Requirement::for_key(key)
        };
        let first = requirement.validate();
        prop_assert_eq!(first.clone(), requirement.validate());
        prop_assert_eq!(first.is_err(), requirement.key.trim().is_empty() && !with_value);
    }
}
