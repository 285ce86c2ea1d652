//! Existence oracles over higher-priority configuration.
//!
//! When a flag still holds its compiled-in default, the provider must decide
//! whether the default is worth contributing at all. The oracle answers the
//! only question that decision needs: does some higher-priority source (a
//! config file, the environment) already own this key path?

use crate::value::{Value, ValueMap};

/// Read-only predicate over an externally maintained configuration tree.
///
/// Passed in at construction time; the provider never holds ambient or
/// global access to the aggregator's state.
pub trait KeyOracle {
    /// Returns true if the delimited key path already holds a value.
    fn exists(&self, path: &str) -> bool;
}

/// Closures work directly as oracles.
impl<F> KeyOracle for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, path: &str) -> bool {
        self(path)
    }
}

/// An oracle over an already-merged value tree.
///
/// Walks object levels by splitting the queried path on the configured
/// delimiter. Both leaves and intermediate objects count as existing: a
/// higher-priority layer that contributed `server.port` also owns the
/// `server` prefix.
pub struct TreeOracle {
    tree: ValueMap,
    delimiter: String,
}

impl TreeOracle {
    /// Create an oracle over `tree`, splitting queried paths on `delimiter`.
    pub fn new(tree: ValueMap, delimiter: impl Into<String>) -> Self {
        Self {
            tree,
            delimiter: delimiter.into(),
        }
    }
}

impl KeyOracle for TreeOracle {
    fn exists(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        if self.delimiter.is_empty() {
            return self.tree.contains_key(path);
        }

        let mut current = &self.tree;
        let mut segments = path.split(self.delimiter.as_str()).peekable();
        while let Some(segment) = segments.next() {
            match current.get(segment) {
                Some(Value::Object(child)) => {
                    if segments.peek().is_none() {
                        return true;
                    }
                    current = child;
                }
                Some(_) => return segments.peek().is_none(),
                None => return false,
            }
        }
        false
    }
}
