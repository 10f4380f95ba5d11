//! Error types for secret resolution operations.

use thiserror::Error;

/// Result type for resolver operations.
pub type Result<T> = std::result::Result<T, SecretsError>;

/// Errors that can occur while resolving a secret reference.
///
/// The substitution pass does not discriminate between these variants: any
/// resolver failure aborts the walk. The variants exist so callers and logs
/// can tell operator mistakes (missing parameter, denied access) from
/// infrastructure trouble (transport failures).
#[derive(Error, Debug)]
pub enum SecretsError {
    /// Parameter not found in the backend.
    #[error("Parameter not found: {name}")]
    NotFound { name: String },

    /// The backend rejected the caller's credentials for this parameter.
    #[error("Access denied for parameter: {name}")]
    AccessDenied { name: String },

    /// Failed to reach the secrets backend.
    #[error("Backend connection failed: {message}")]
    ConnectionFailed { message: String },

    /// Malformed parameter reference.
    #[error("Invalid parameter reference: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Backend-specific error.
    #[error("Backend error: {message}")]
    BackendError { message: String },
}

impl SecretsError {
    /// Create a not found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create an access denied error.
    pub fn access_denied(name: impl Into<String>) -> Self {
        Self::AccessDenied { name: name.into() }
    }

    /// Create a connection failed error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed { message: message.into() }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name: name.into(), reason: reason.into() }
    }

    /// Create a backend error.
    pub fn backend_error(message: impl Into<String>) -> Self {
        Self::BackendError { message: message.into() }
    }
}
