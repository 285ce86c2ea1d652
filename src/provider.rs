//! The capability contract shared by all configuration providers.
//!
//! The aggregator talks to every source through this trait. A source only
//! has to do one thing well (produce a nested tree) and explicitly reject
//! the capabilities it does not have.

use crate::error::ProviderError;
use crate::value::ValueMap;

/// Callback handed to [`Provider::watch`], invoked by watchable providers
/// with a freshly re-read tree or an error. Providers without change
/// notification must never invoke it.
pub type WatchCallback = Box<dyn FnMut(Result<ValueMap, ProviderError>) + Send>;

/// A configuration source that contributes a nested key/value tree to a
/// layered configuration object.
pub trait Provider {
    /// Read the source and return a nested configuration tree.
    fn extract(&self) -> Result<ValueMap, ProviderError>;

    /// Return the raw byte serialization of the source, for providers that
    /// have one. Providers without a byte form fail with
    /// [`ProviderError::Unsupported`].
    fn read_raw(&self) -> Result<Vec<u8>, ProviderError>;

    /// Subscribe to change notifications. Providers without change
    /// notification fail with [`ProviderError::Unsupported`] and never
    /// invoke `cb`.
    fn watch(&self, cb: WatchCallback) -> Result<(), ProviderError>;
}
