//! Flag extraction: precedence, coercion, and nesting.
//!
//! This is the decision core of the crate. For every defined flag it
//! decides:
//! - whether the flag contributes at all (explicit assignment always wins;
//!   defaults only fill holes a higher-priority layer left open)
//! - which key it contributes under (raw name or rename hook)
//! - how its native type maps into the generic value model
//!
//! The accumulated flat entries are then expanded by the configured
//! delimiter into the nested tree the aggregator merges.

use heck::ToSnakeCase;

use crate::error::ProviderError;
use crate::flag::{Flag, FlagKind, FlagSource};
use crate::oracle::KeyOracle;
use crate::provider::{Provider, WatchCallback};
use crate::tree::nest;
use crate::value::{Value, ValueMap};

/// Hook that computes the output key for a flag, overriding its declared
/// name. Applied before the inclusion decision, so the existence oracle is
/// consulted with the key the output will actually use.
pub type RenameFn = Box<dyn Fn(&Flag) -> String>;

/// Hook invoked for flags whose declared kind is outside the recognized
/// primitive/slice set, with the candidate key and the value's string
/// rendering. The returned pair is stored verbatim; returning an empty key
/// drops the flag from the output entirely.
pub type TransformFn = Box<dyn Fn(&str, &str) -> (String, Value)>;

// ============================================================================
// FlagsConfig
// ============================================================================

/// Configuration for flag extraction.
pub struct FlagsConfig {
    /// Separator used to expand flat flag names into nested key levels.
    /// With delimiter `"."`, the flag `parent.child.key` contributes at
    /// nested levels `{parent: {child: {key: ...}}}`.
    pub delimiter: String,

    /// Existence oracle over higher-priority layers. When present, a flag
    /// still holding its default contributes unless the oracle already owns
    /// the key; when absent, unchanged flags contribute nothing.
    pub oracle: Option<Box<dyn KeyOracle>>,

    /// Key rename hook, for output naming conventions that differ from
    /// flag-naming conventions.
    pub rename: Option<RenameFn>,

    /// Value transform hook for custom-typed flags.
    pub transform: Option<TransformFn>,
}

impl FlagsConfig {
    /// Create a config with the given delimiter and no hooks.
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
            oracle: None,
            rename: None,
            transform: None,
        }
    }
}

/// Builder for flag extraction configuration.
pub struct FlagsConfigBuilder {
    delimiter: String,
    oracle: Option<Box<dyn KeyOracle>>,
    rename: Option<RenameFn>,
    transform: Option<TransformFn>,
}

impl Default for FlagsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FlagsConfigBuilder {
    /// Create a new builder. The delimiter starts as `"."`.
    pub fn new() -> Self {
        Self {
            delimiter: ".".to_string(),
            oracle: None,
            rename: None,
            transform: None,
        }
    }

    /// Set the nesting delimiter. An empty delimiter disables nesting.
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Arbitrate default inclusion against higher-priority layers.
    pub fn oracle(mut self, oracle: impl KeyOracle + 'static) -> Self {
        self.oracle = Some(Box::new(oracle));
        self
    }

    /// Override output key naming.
    pub fn rename(mut self, rename: impl Fn(&Flag) -> String + 'static) -> Self {
        self.rename = Some(Box::new(rename));
        self
    }

    /// Transform custom-typed flag values.
    pub fn transform(
        mut self,
        transform: impl Fn(&str, &str) -> (String, Value) + 'static,
    ) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Build the flags configuration.
    pub fn build(self) -> FlagsConfig {
        FlagsConfig {
            delimiter: self.delimiter,
            oracle: self.oracle,
            rename: self.rename,
            transform: self.transform,
        }
    }
}

/// Returns a rename hook that maps kebab-case flag names to snake_case
/// output keys.
///
/// Conversion is applied per delimiter segment so nested paths keep their
/// structure: with delimiter `"."`, the flag `server.max-conns` becomes the
/// key `server.max_conns`.
pub fn snake_case_keys(delimiter: impl Into<String>) -> RenameFn {
    let delimiter = delimiter.into();
    Box::new(move |flag: &Flag| {
        if delimiter.is_empty() {
            return flag.name().to_snake_case();
        }
        flag.name()
            .split(delimiter.as_str())
            .map(|segment| segment.to_snake_case())
            .collect::<Vec<_>>()
            .join(&delimiter)
    })
}

// ============================================================================
// FlagsProvider
// ============================================================================

/// A command-line flag configuration provider.
///
/// Reads an already-populated flag registry and contributes a nested tree.
/// Explicitly assigned flags always contribute; flags still holding their
/// compiled-in default contribute only when an oracle is configured and no
/// higher-priority layer owns the key.
///
/// ```rust
/// use flagon::{FlagSet, FlagValue, FlagsConfig, FlagsProvider, Value};
///
/// let mut flags = FlagSet::new();
/// flags.define("host", FlagValue::String("localhost".into()));
/// flags.define("server.port", FlagValue::Int32(8080));
/// flags.set("server.port", FlagValue::Int32(3000));
///
/// let provider = FlagsProvider::new(flags, FlagsConfig::new("."));
/// let tree = provider.extract().unwrap();
///
/// let server = tree.get("server").and_then(Value::as_object).unwrap();
/// assert_eq!(server.get("port"), Some(&Value::Integer(3000)));
/// assert!(!tree.contains_key("host")); // unchanged default, no oracle
/// ```
pub struct FlagsProvider<S> {
    source: S,
    config: FlagsConfig,
}

impl<S: FlagSource> FlagsProvider<S> {
    /// Create a provider over `source` with the given configuration.
    pub fn new(source: S, config: FlagsConfig) -> Self {
        Self { source, config }
    }

    /// Convenience constructor for the common hook-free case.
    pub fn with_delimiter(source: S, delimiter: impl Into<String>) -> Self {
        Self::new(source, FlagsConfig::new(delimiter))
    }

    /// Read the registry and return the nested configuration tree.
    ///
    /// This never fails; the `Result` is the shared provider contract's
    /// reserved error channel.
    pub fn extract(&self) -> Result<ValueMap, ProviderError> {
        let mut flat = ValueMap::default();

        for flag in self.source.flags() {
            let key = match &self.config.rename {
                Some(rename) => rename(flag),
                None => flag.name().to_string(),
            };

            // A flag still holding its compiled-in default only contributes
            // when an oracle is present and no higher-priority layer owns
            // the key. Explicit assignments always contribute.
            if !flag.changed() {
                match &self.config.oracle {
                    None => continue,
                    Some(oracle) if oracle.exists(&key) => {
                        tracing::debug!(flag = flag.name(), key = %key, "default shadowed by higher-priority layer");
                        continue;
                    }
                    Some(_) => {}
                }
            }

            let value = match flag.kind() {
                FlagKind::Int
                | FlagKind::Int8
                | FlagKind::Int16
                | FlagKind::Int32
                | FlagKind::Int64 => Value::Integer(flag.value().as_int64().unwrap_or_default()),
                FlagKind::Float32 => {
                    Value::Float32(flag.value().as_float32().unwrap_or_default())
                }
                FlagKind::Float64 => Value::Float(flag.value().as_float64().unwrap_or_default()),
                FlagKind::Bool => Value::Bool(flag.value().as_bool().unwrap_or_default()),
                FlagKind::StringList => Value::StringArray(
                    flag.value()
                        .as_string_list()
                        .map(<[String]>::to_vec)
                        .unwrap_or_default(),
                ),
                FlagKind::IntList => Value::IntegerArray(
                    flag.value()
                        .as_int_list()
                        .map(<[i64]>::to_vec)
                        .unwrap_or_default(),
                ),
                // Plain strings and custom types both take the fallback
                // path: through the transform hook when configured, else the
                // string rendering.
                FlagKind::String | FlagKind::Other => match &self.config.transform {
                    Some(transform) => {
                        let (key, value) = transform(&key, &flag.value().render());
                        if key.is_empty() {
                            continue;
                        }
                        flat.insert(key, value);
                        continue;
                    }
                    None => Value::String(flag.value().render()),
                },
            };

            flat.insert(key, value);
        }

        tracing::debug!(entries = flat.len(), "extracted flag entries");
        Ok(nest(flat, &self.config.delimiter))
    }

    /// Flags have no raw byte serialization.
    pub fn read_raw(&self) -> Result<Vec<u8>, ProviderError> {
        Err(ProviderError::unsupported("flags", "read_raw"))
    }

    /// Flags have no change notification; `cb` is never invoked.
    pub fn watch(&self, _cb: WatchCallback) -> Result<(), ProviderError> {
        Err(ProviderError::unsupported("flags", "watch"))
    }
}

impl<S: FlagSource> Provider for FlagsProvider<S> {
    fn extract(&self) -> Result<ValueMap, ProviderError> {
        FlagsProvider::extract(self)
    }

    fn read_raw(&self) -> Result<Vec<u8>, ProviderError> {
        FlagsProvider::read_raw(self)
    }

    fn watch(&self, cb: WatchCallback) -> Result<(), ProviderError> {
        FlagsProvider::watch(self, cb)
    }
}
