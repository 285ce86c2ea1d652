//! The generic value model produced by extraction.
//!
//! Providers contribute values in a small closed set of kinds; the aggregator
//! merges trees of these values across layers. Two float kinds are kept
//! distinct because flag registries declare 32- and 64-bit floats separately
//! and the aggregator is expected to preserve that.

use indexmap::IndexMap;

/// Ordered map of keys to values. Insertion order is preserved so that
/// extraction output is deterministic and last-write-wins semantics are
/// observable.
pub type ValueMap = IndexMap<String, Value>;

/// A configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer. Narrower flag integers widen into this.
    Integer(i64),
    /// A 32-bit floating-point value.
    Float32(f32),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A string value.
    String(String),
    /// An ordered sequence of strings.
    StringArray(Vec<String>),
    /// An ordered sequence of 64-bit integers.
    IntegerArray(Vec<i64>),
    /// A nested object/map of key-value pairs.
    Object(ValueMap),
}

impl Value {
    /// Get the nested map if this value is an object.
    pub fn as_object(&self) -> Option<&ValueMap> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns true if this value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }
}
