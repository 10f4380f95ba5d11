//! Secret resolution for configuration placeholders.
//!
//! This module provides the resolver boundary used by the substitution pass:
//! a backend-agnostic [`SecretResolver`] trait with one operation,
//! [`SecretResolver::resolve`], which maps the identifier portion of an
//! `ssm://` reference to its plaintext value.
//!
//! # Supported Backends
//!
//! - **AWS SSM Parameter Store** ([`SsmResolver`], `aws` feature): production
//!   backend; fetches parameters with decryption enabled so SecureString
//!   values arrive in the clear.
//! - **Environment Variables** ([`EnvVarResolver`]): development fallback
//!   using the `SSMCONFIG_SECRET_*` prefix.
//!
//! # Basic Example
//!
//! ```rust,ignore
//! use ssmconfig::secrets::{SecretResolver, SsmResolver};
//!
//! // Credentials and region come from the ambient AWS environment.
//! let resolver = SsmResolver::from_env().await;
//!
//! // Fetch a decrypted parameter value.
//! let value = resolver.resolve("prod/db/password").await?;
//! ```
//!
//! # Security Considerations
//!
//! - Resolved values are never logged; backends log parameter names only
//! - Each `resolve` call is a fresh backend lookup: no caching, no retry
//! - Errors carry the parameter name, never the value

pub mod env;
pub mod error;
pub mod resolver;
#[cfg(feature = "aws")]
pub mod ssm;

// Re-export main types
pub use env::EnvVarResolver;
pub use error::{Result, SecretsError};
pub use resolver::SecretResolver;
#[cfg(feature = "aws")]
pub use ssm::SsmResolver;
