//! Error taxonomy for provider operations.

use std::fmt;

/// An error returned by a provider operation.
///
/// The taxonomy is deliberately minimal: extraction has no defined failure
/// mode, so the only kind is the synchronous rejection of operations outside
/// a provider's capability set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProviderError {
    /// The operation is not part of this provider's capability set.
    Unsupported {
        /// Name of the provider that rejected the operation.
        provider: &'static str,
        /// The rejected operation.
        operation: &'static str,
    },
}

impl ProviderError {
    /// Shorthand for an [`ProviderError::Unsupported`] error.
    pub const fn unsupported(provider: &'static str, operation: &'static str) -> Self {
        ProviderError::Unsupported {
            provider,
            operation,
        }
    }

    /// Returns an error code for this error kind.
    pub const fn code(&self) -> &'static str {
        match self {
            ProviderError::Unsupported { .. } => "provider::unsupported",
        }
    }

    /// Returns a short label for the error.
    pub fn label(&self) -> String {
        match self {
            ProviderError::Unsupported {
                provider,
                operation,
            } => {
                format!("`{operation}` is not supported by the {provider} provider")
            }
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::error::Error for ProviderError {}
