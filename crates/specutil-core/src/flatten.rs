//! Recursive flattening of nested sequences.

use serde_json::Value as JsonValue;

/// A value that is either a leaf or a nested sequence of values
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<T> {
    Item(T),
    Seq(Vec<Nested<T>>),
}

impl<T> From<T> for Nested<T> {
    fn from(item: T) -> Self {
        Self::Item(item)
    }
}

/// Collect every leaf of `seq`, depth first, in order.
pub fn flatten<T: Clone>(seq: &[Nested<T>]) -> Vec<T> {
    let mut out = Vec::new();
    for elt in seq {
        match elt {
            Nested::Item(item) => out.push(item.clone()),
            Nested::Seq(inner) => out.extend(flatten(inner)),
        }
    }
    out
}

/// Flatten a JSON array tree. Non-array values are leaves.
pub fn flatten_json(value: &JsonValue) -> Vec<JsonValue> {
    match value {
        JsonValue::Array(items) => items.iter().flat_map(flatten_json).collect(),
        leaf => vec![leaf.clone()],
    }
}
