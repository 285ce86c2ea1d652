#![warn(missing_docs)]
#![deny(unsafe_code)]
//! # flagon - Command-Line Flags as a Configuration Layer
//!
//! flagon turns an already-populated set of command-line flag definitions
//! into a nested key/value tree that a layered configuration aggregator can
//! merge with its other sources (files, environment, defaults).
//!
//! It deliberately does **not** parse command lines: a flag library owns
//! parsing and mutation tracking, and exposes the result through the
//! [`FlagSource`] registry contract. flagon owns the part that comes after:
//! - **Precedence**: an explicitly assigned flag always contributes; a flag
//!   still holding its compiled-in default contributes only when a
//!   [`KeyOracle`] confirms no higher-priority source owns the key.
//! - **Coercion**: narrow integers widen to `i64`, both float widths are
//!   preserved, sequences stay ordered, and custom types flow through an
//!   optional transform hook.
//! - **Nesting**: delimiter-bearing flag names expand into nested objects
//!   (`server.port` → `{server: {port: ...}}`).
//!
//! ## Quick Start
//!
//! ```rust
//! use flagon::{FlagSet, FlagValue, FlagsConfig, FlagsProvider, Value};
//!
//! let mut flags = FlagSet::new();
//! flags.define("host", FlagValue::String("localhost".into()));
//! flags.define("server.port", FlagValue::Int32(8080));
//! // The user passed --server.port on the command line:
//! flags.set("server.port", FlagValue::Int32(3000));
//!
//! let provider = FlagsProvider::new(flags, FlagsConfig::new("."));
//! let tree = provider.extract().unwrap();
//!
//! let server = tree.get("server").and_then(Value::as_object).unwrap();
//! assert_eq!(server.get("port"), Some(&Value::Integer(3000)));
//! // `host` still holds its default and no oracle was configured, so it
//! // contributes nothing.
//! assert!(!tree.contains_key("host"));
//! ```
//!
//! ## Defaults and Higher-Priority Layers
//!
//! Wire in an oracle over the aggregator's already-merged tree to let flag
//! defaults fill exactly the holes other layers left open:
//!
//! ```rust
//! use flagon::{FlagSet, FlagValue, FlagsConfigBuilder, FlagsProvider, TreeOracle, Value, ValueMap};
//!
//! let mut flags = FlagSet::new();
//! flags.define("host", FlagValue::String("localhost".into()));
//! flags.define("port", FlagValue::Int(8080));
//!
//! // A config file already set `host`.
//! let merged: ValueMap = [("host".to_string(), Value::String("example.com".into()))]
//!     .into_iter()
//!     .collect();
//!
//! let config = FlagsConfigBuilder::new()
//!     .oracle(TreeOracle::new(merged, "."))
//!     .build();
//! let tree = FlagsProvider::new(flags, config).extract().unwrap();
//!
//! assert!(!tree.contains_key("host")); // file wins over the flag default
//! assert_eq!(tree.get("port"), Some(&Value::Integer(8080)));
//! ```
//!
//! ## Hooks
//!
//! Two independently optional hooks adjust the output without touching the
//! registry: a rename hook ([`FlagsConfigBuilder::rename`], e.g.
//! [`snake_case_keys`]) recomputes output keys, and a transform hook
//! ([`FlagsConfigBuilder::transform`]) maps custom-typed flag values into
//! the generic model, or suppresses a flag entirely by returning an empty
//! key.

pub(crate) mod error;
pub(crate) mod extract;
pub(crate) mod flag;
pub(crate) mod oracle;
pub(crate) mod provider;
pub(crate) mod tree;
pub(crate) mod value;

// ==========================================
// PUBLIC INTERFACE
// ==========================================

pub use error::ProviderError;
pub use extract::{
    snake_case_keys, FlagsConfig, FlagsConfigBuilder, FlagsProvider, RenameFn, TransformFn,
};
pub use flag::{Flag, FlagKind, FlagSet, FlagSource, FlagValue};
pub use oracle::{KeyOracle, TreeOracle};
pub use provider::{Provider, WatchCallback};
pub use tree::{flatten, nest};
pub use value::{Value, ValueMap};
