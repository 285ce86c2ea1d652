//! Flag definitions and the registry contract.
//!
//! The provider never parses command lines itself; a collaborator flag
//! library owns parsing and mutation tracking. This module defines what the
//! provider needs from that collaborator:
//! - `FlagKind`: the closed set of declared type tags
//! - `FlagValue`: a type-erased current value with typed accessors
//! - `Flag`: one definition (name, value, "was explicitly set" marker)
//! - `FlagSource`: the registry iteration contract
//! - `FlagSet`: an in-memory registry, for tests and for callers that
//!   assemble flags by hand from their parsing library of choice

use std::fmt;

use indexmap::IndexMap;

// ============================================================================
// FlagKind
// ============================================================================

/// The declared type tag of a flag.
///
/// This is a closed, enumerable set: the coercion rules in extraction are a
/// single match over it. Anything a registry cannot express natively is
/// `Other` and carries only its string rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Platform-default signed integer.
    Int,
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// Boolean.
    Bool,
    /// String.
    String,
    /// Ordered sequence of strings.
    StringList,
    /// Ordered sequence of integers.
    IntList,
    /// Any type outside the recognized set (durations, addresses, ...).
    Other,
}

// ============================================================================
// FlagValue
// ============================================================================

/// The current value of a flag, readable through type-specific accessors.
///
/// Accessors return `None` on a kind mismatch; callers substitute the zero
/// value for the type they asked for rather than failing extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    /// Platform-default signed integer.
    Int(isize),
    /// 8-bit signed integer.
    Int8(i8),
    /// 16-bit signed integer.
    Int16(i16),
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// 32-bit float.
    Float32(f32),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// String.
    String(String),
    /// Ordered sequence of strings.
    StringList(Vec<String>),
    /// Ordered sequence of 64-bit integers.
    IntList(Vec<i64>),
    /// The string rendering of a value type the registry does not model
    /// natively.
    Other(String),
}

impl FlagValue {
    /// The declared type tag for this value.
    pub fn kind(&self) -> FlagKind {
        match self {
            FlagValue::Int(_) => FlagKind::Int,
            FlagValue::Int8(_) => FlagKind::Int8,
            FlagValue::Int16(_) => FlagKind::Int16,
            FlagValue::Int32(_) => FlagKind::Int32,
            FlagValue::Int64(_) => FlagKind::Int64,
            FlagValue::Float32(_) => FlagKind::Float32,
            FlagValue::Float64(_) => FlagKind::Float64,
            FlagValue::Bool(_) => FlagKind::Bool,
            FlagValue::String(_) => FlagKind::String,
            FlagValue::StringList(_) => FlagKind::StringList,
            FlagValue::IntList(_) => FlagKind::IntList,
            FlagValue::Other(_) => FlagKind::Other,
        }
    }

    /// Widen any signed-integer variant to `i64`, value-preservingly.
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            FlagValue::Int(v) => Some(*v as i64),
            FlagValue::Int8(v) => Some(i64::from(*v)),
            FlagValue::Int16(v) => Some(i64::from(*v)),
            FlagValue::Int32(v) => Some(i64::from(*v)),
            FlagValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the 32-bit float value.
    pub fn as_float32(&self) -> Option<f32> {
        match self {
            FlagValue::Float32(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the 64-bit float value.
    pub fn as_float64(&self) -> Option<f64> {
        match self {
            FlagValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the string sequence.
    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            FlagValue::StringList(items) => Some(items),
            _ => None,
        }
    }

    /// Get the integer sequence.
    pub fn as_int_list(&self) -> Option<&[i64]> {
        match self {
            FlagValue::IntList(items) => Some(items),
            _ => None,
        }
    }

    /// The generic string rendering of any value. Sequences render
    /// comma-separated.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Int(v) => write!(f, "{v}"),
            FlagValue::Int8(v) => write!(f, "{v}"),
            FlagValue::Int16(v) => write!(f, "{v}"),
            FlagValue::Int32(v) => write!(f, "{v}"),
            FlagValue::Int64(v) => write!(f, "{v}"),
            FlagValue::Float32(v) => write!(f, "{v}"),
            FlagValue::Float64(v) => write!(f, "{v}"),
            FlagValue::Bool(v) => write!(f, "{v}"),
            FlagValue::String(s) => f.write_str(s),
            FlagValue::StringList(items) => f.write_str(&items.join(",")),
            FlagValue::IntList(items) => {
                let rendered: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                f.write_str(&rendered.join(","))
            }
            FlagValue::Other(s) => f.write_str(s),
        }
    }
}

// ============================================================================
// Flag
// ============================================================================

/// A single flag definition: a named, typed value plus the marker that tells
/// an explicit user assignment apart from an unused compiled-in default.
///
/// Flags are owned by their registry; the provider only reads them.
#[derive(Debug, Clone)]
pub struct Flag {
    name: String,
    kind: FlagKind,
    value: FlagValue,
    changed: bool,
}

impl Flag {
    /// Create a flag holding its compiled-in default (`changed = false`).
    /// The declared kind is taken from the value.
    pub fn new(name: impl Into<String>, value: FlagValue) -> Self {
        Self {
            name: name.into(),
            kind: value.kind(),
            value,
            changed: false,
        }
    }

    /// Create a flag whose declared kind differs from the erased value
    /// representation. Registries at a foreign-library boundary may declare
    /// one tag while the stored value disagrees; extraction then substitutes
    /// the zero value for the declared kind rather than failing.
    pub fn with_kind(name: impl Into<String>, kind: FlagKind, value: FlagValue) -> Self {
        Self {
            name: name.into(),
            kind,
            value,
            changed: false,
        }
    }

    /// The flag's declared name, unique within its registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type tag.
    pub fn kind(&self) -> FlagKind {
        self.kind
    }

    /// The current value.
    pub fn value(&self) -> &FlagValue {
        &self.value
    }

    /// Whether the user explicitly assigned this flag, as opposed to it still
    /// holding its default.
    pub fn changed(&self) -> bool {
        self.changed
    }
}

// ============================================================================
// FlagSource trait
// ============================================================================

/// The registry contract consumed by the provider.
///
/// Implementations must visit every defined flag exactly once, in the
/// registry's natural order. The provider never mutates the registry.
pub trait FlagSource {
    /// Iterate over all defined flags.
    fn flags(&self) -> Box<dyn Iterator<Item = &Flag> + '_>;
}

// ============================================================================
// FlagSet
// ============================================================================

/// An in-memory flag registry.
///
/// This is both the test double and the bridge for callers whose flag
/// library does not implement [`FlagSource`] directly: define each flag with
/// its default, then `set` the ones the user passed on the command line.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    flags: IndexMap<String, Flag>,
}

impl FlagSet {
    /// Create a new empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flag set from an iterator of (name, default value) pairs.
    /// None of the resulting flags is marked changed.
    pub fn from_defaults<I, K>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, FlagValue)>,
        K: Into<String>,
    {
        let mut set = Self::new();
        for (name, value) in iter {
            set.define(name, value);
        }
        set
    }

    /// Define a flag with its compiled-in default. Redefining an existing
    /// name replaces its value and clears the changed marker.
    pub fn define(&mut self, name: impl Into<String>, value: FlagValue) {
        let name = name.into();
        self.flags.insert(
            name.clone(),
            Flag {
                name,
                kind: value.kind(),
                value,
                changed: false,
            },
        );
    }

    /// Insert a pre-built flag, preserving its kind and changed marker.
    pub fn insert(&mut self, flag: Flag) {
        self.flags.insert(flag.name.clone(), flag);
    }

    /// Assign a flag's value and mark it explicitly set. Setting an
    /// undefined name defines it as changed.
    pub fn set(&mut self, name: impl Into<String>, value: FlagValue) {
        let name = name.into();
        self.flags.insert(
            name.clone(),
            Flag {
                name,
                kind: value.kind(),
                value,
                changed: true,
            },
        );
    }

    /// Look up a flag by name.
    pub fn get(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    /// Number of defined flags.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns true if no flags are defined.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl FlagSource for FlagSet {
    fn flags(&self) -> Box<dyn Iterator<Item = &Flag> + '_> {
        Box::new(self.flags.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Tests: accessors and widening
    // ========================================================================

    #[test]
    fn test_integer_widening_preserves_values() {
        assert_eq!(FlagValue::Int8(127).as_int64(), Some(127));
        assert_eq!(FlagValue::Int8(-128).as_int64(), Some(-128));
        assert_eq!(FlagValue::Int16(i16::MIN).as_int64(), Some(-32768));
        assert_eq!(FlagValue::Int32(i32::MAX).as_int64(), Some(2147483647));
        assert_eq!(FlagValue::Int64(i64::MIN).as_int64(), Some(i64::MIN));
        assert_eq!(FlagValue::Int(-42).as_int64(), Some(-42));
    }

    #[test]
    fn test_mismatched_accessor_returns_none() {
        assert_eq!(FlagValue::String("8080".into()).as_int64(), None);
        assert_eq!(FlagValue::Int64(1).as_bool(), None);
        assert_eq!(FlagValue::Float64(1.0).as_float32(), None);
        assert_eq!(FlagValue::Float32(1.0).as_float64(), None);
        assert!(FlagValue::Bool(true).as_string_list().is_none());
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(FlagValue::Int8(0).kind(), FlagKind::Int8);
        assert_eq!(FlagValue::Float32(0.0).kind(), FlagKind::Float32);
        assert_eq!(FlagValue::StringList(vec![]).kind(), FlagKind::StringList);
        assert_eq!(FlagValue::Other("5s".into()).kind(), FlagKind::Other);
    }

    #[test]
    fn test_with_kind_keeps_declared_tag() {
        let flag = Flag::with_kind("port", FlagKind::Int64, FlagValue::String("8080".into()));
        assert_eq!(flag.kind(), FlagKind::Int64);
        assert_eq!(flag.value().as_int64(), None);
        assert!(!flag.changed());
    }

    #[test]
    fn test_render() {
        assert_eq!(FlagValue::Int16(300).render(), "300");
        assert_eq!(FlagValue::Bool(true).render(), "true");
        assert_eq!(
            FlagValue::StringList(vec!["a".into(), "b".into()]).render(),
            "a,b"
        );
        assert_eq!(FlagValue::IntList(vec![1, 2, 3]).render(), "1,2,3");
        assert_eq!(FlagValue::Other("1h30m".into()).render(), "1h30m");
    }

    // ========================================================================
    // Tests: FlagSet
    // ========================================================================

    #[test]
    fn test_define_is_not_changed() {
        let mut flags = FlagSet::new();
        flags.define("host", FlagValue::String("localhost".into()));

        let flag = flags.get("host").expect("host should be defined");
        assert!(!flag.changed());
        assert_eq!(flag.value().as_str(), Some("localhost"));
    }

    #[test]
    fn test_set_marks_changed() {
        let mut flags = FlagSet::new();
        flags.define("port", FlagValue::Int32(8080));
        flags.set("port", FlagValue::Int32(3000));

        let flag = flags.get("port").expect("port should be defined");
        assert!(flag.changed());
        assert_eq!(flag.value().as_int64(), Some(3000));
    }

    #[test]
    fn test_set_undefined_defines_as_changed() {
        let mut flags = FlagSet::new();
        flags.set("verbose", FlagValue::Bool(true));

        let flag = flags.get("verbose").expect("verbose should exist");
        assert!(flag.changed());
    }

    #[test]
    fn test_redefine_clears_changed() {
        let mut flags = FlagSet::new();
        flags.set("port", FlagValue::Int32(3000));
        flags.define("port", FlagValue::Int32(8080));

        let flag = flags.get("port").expect("port should exist");
        assert!(!flag.changed());
        assert_eq!(flag.value().as_int64(), Some(8080));
    }

    #[test]
    fn test_iteration_preserves_definition_order() {
        let mut flags = FlagSet::new();
        flags.define("c", FlagValue::Bool(false));
        flags.define("a", FlagValue::Bool(false));
        flags.define("b", FlagValue::Bool(false));
        // Assigning does not move a flag to the back.
        flags.set("c", FlagValue::Bool(true));

        let names: Vec<&str> = flags.flags().map(Flag::name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_from_defaults() {
        let flags = FlagSet::from_defaults([
            ("host", FlagValue::String("localhost".into())),
            ("port", FlagValue::Int32(8080)),
        ]);

        assert_eq!(flags.len(), 2);
        assert!(!flags.is_empty());
        assert!(!flags.get("host").unwrap().changed());
    }
}
