//! # Error Handling
//!
//! Top-level error types for configuration loading and secret substitution,
//! defined with `thiserror`. Resolver backends carry their own error type
//! ([`crate::secrets::SecretsError`]) which is wrapped here so callers see a
//! single failure surface: either the document did not decode, or a secret
//! reference did not resolve.

use crate::secrets::SecretsError;

/// Custom result type for ssmconfig operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for configuration loading and substitution
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Document decode errors, including destination shape mismatches
    #[error("Decode error: {0}")]
    Decode(#[from] serde_yaml::Error),

    /// Secret resolution errors surfaced from the resolver backend
    #[error("Secret resolution failed: {0}")]
    Resolution(#[from] SecretsError),
}

impl Error {
    /// Returns true if this error originated in the resolver backend.
    pub fn is_resolution(&self) -> bool {
        matches!(self, Error::Resolution(_))
    }
}
