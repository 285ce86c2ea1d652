//! Delimiter-based nesting and flattening of key paths.
//!
//! Flags carry flat names like `server.port`; the aggregator wants nested
//! trees. [`nest`] expands a flat map by a delimiter, [`flatten`] is the
//! inverse over leaves. For flat maps without delimiter collisions the two
//! round-trip exactly.

use crate::value::{Value, ValueMap};

/// Expand every delimiter-bearing key in `flat` into nested objects.
///
/// With delimiter `"."`, the key `parent.child.key` becomes nested levels
/// `parent` → `child` → `key`. An empty delimiter disables splitting and
/// returns the map unchanged.
///
/// Overlapping partial paths resolve by last write wins: a later entry
/// replaces whatever sits at its path, converting non-object intermediates
/// into objects as needed.
pub fn nest(flat: ValueMap, delimiter: &str) -> ValueMap {
    if delimiter.is_empty() {
        return flat;
    }

    let mut root = ValueMap::default();
    for (key, value) in flat {
        let segments: Vec<&str> = key.split(delimiter).collect();
        insert_at(&mut root, &segments, value);
    }
    root
}

/// Insert a value at a nested path, creating intermediate objects as needed.
fn insert_at(map: &mut ValueMap, path: &[&str], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };

    if rest.is_empty() {
        map.insert((*first).to_string(), value);
        return;
    }

    let entry = map
        .entry((*first).to_string())
        .or_insert_with(|| Value::Object(ValueMap::default()));

    if let Value::Object(child) = entry {
        insert_at(child, rest, value);
    } else {
        // A scalar already sits on this path; the later entry wins.
        let mut child = ValueMap::default();
        insert_at(&mut child, rest, value);
        *entry = Value::Object(child);
    }
}

/// Collapse a nested tree back into a flat map of delimiter-joined leaf
/// paths. Empty objects contribute nothing.
pub fn flatten(tree: &ValueMap, delimiter: &str) -> ValueMap {
    let mut flat = ValueMap::default();
    flatten_into(tree, delimiter, "", &mut flat);
    flat
}

fn flatten_into(map: &ValueMap, delimiter: &str, prefix: &str, out: &mut ValueMap) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{delimiter}{key}")
        };
        match value {
            Value::Object(child) => flatten_into(child, delimiter, &path, out),
            other => {
                out.insert(path, other.clone());
            }
        }
    }
}
