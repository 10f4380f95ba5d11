//! Core resolver trait.

use async_trait::async_trait;

use super::error::Result;

/// Trait for secret resolver backends.
///
/// Implementations map the identifier portion of an `ssm://` reference (the
/// string with the scheme stripped) to its plaintext value. The substitution
/// pass never validates the identifier beyond stripping the scheme; whatever
/// syntax the backend requires is the backend's business.
///
/// # Contract
///
/// - `resolve` must be a pure function of the identifier at call time: no
///   side effects observable to the caller beyond the returned value/error
/// - Every placeholder occurrence triggers its own call, even when several
///   occurrences share an identifier; implementations may memoize internally
///   but correctness must not depend on it
/// - Implementations MUST NOT log resolved values
///
/// # Example Implementation
///
/// ```rust,ignore
/// use ssmconfig::secrets::{Result, SecretResolver};
/// use async_trait::async_trait;
///
/// struct FixedResolver;
///
/// #[async_trait]
/// impl SecretResolver for FixedResolver {
///     async fn resolve(&self, name: &str) -> Result<String> {
///         Ok(format!("value-of-{name}"))
///     }
/// }
/// ```
#[async_trait]
pub trait SecretResolver: Send + Sync {
    /// Resolve a parameter name to its plaintext value.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::NotFound`] if the parameter doesn't exist
    /// - [`SecretsError::AccessDenied`] if the backend refuses access
    /// - [`SecretsError::ConnectionFailed`] if the backend is unreachable
    ///
    /// [`SecretsError::NotFound`]: super::SecretsError::NotFound
    /// [`SecretsError::AccessDenied`]: super::SecretsError::AccessDenied
    /// [`SecretsError::ConnectionFailed`]: super::SecretsError::ConnectionFailed
    async fn resolve(&self, name: &str) -> Result<String>;
}
