//! # ssmconfig
//!
//! ssmconfig loads YAML configuration documents and materializes secret
//! references as a post-processing pass: any string value carrying the
//! `ssm://` scheme is replaced by the corresponding parameter fetched (with
//! decryption) from AWS SSM Parameter Store, or from whatever resolver
//! backend the caller injects.
//!
//! ## Architecture
//!
//! The system follows a two-layer design:
//!
//! ```text
//! Entry Points (from_str / from_slice)
//!        ↓
//! Substitution Pass (transform)  →  Resolver Boundary (SecretResolver)
//!                                          ↓
//!                                   SSM / Environment
//! ```
//!
//! The substitution pass builds a fresh copy of the decoded value graph and
//! commits it back to the caller's destination only after every reference
//! has resolved, so a failed load never leaves a half-substituted value
//! behind.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use serde::{Deserialize, Serialize};
//! use ssmconfig::Result;
//!
//! #[derive(Serialize, Deserialize)]
//! struct AppConfig {
//!     listen_addr: String,
//!     db_password: String, // "ssm://prod/db/password" in the document
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let raw = std::fs::read_to_string("config.yaml").expect("config file");
//!     let config: AppConfig = ssmconfig::from_str(&raw).await?;
//!     println!("listening on {}", config.listen_addr);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod secrets;
pub mod transform;

use serde::de::DeserializeOwned;
use serde::Serialize;

// Re-export commonly used types and traits
pub use errors::{Error, Result};
pub use secrets::{EnvVarResolver, SecretResolver, SecretsError};
#[cfg(feature = "aws")]
pub use secrets::SsmResolver;
pub use transform::{transform, SECRET_SCHEME};

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decodes a YAML document and substitutes secret references using the
/// supplied resolver.
///
/// Decode failures surface before any resolver call is made; resolution
/// failures abort the load with nothing partially applied.
pub async fn from_str_with<T>(input: &str, resolver: &dyn SecretResolver) -> Result<T>
where
    T: DeserializeOwned + Serialize,
{
    let mut target: T = serde_yaml::from_str(input)?;
    transform::transform(&mut target, resolver).await?;
    Ok(target)
}

/// Byte-slice variant of [`from_str_with`].
pub async fn from_slice_with<T>(input: &[u8], resolver: &dyn SecretResolver) -> Result<T>
where
    T: DeserializeOwned + Serialize,
{
    let mut target: T = serde_yaml::from_slice(input)?;
    transform::transform(&mut target, resolver).await?;
    Ok(target)
}

/// Decodes a YAML document and substitutes secret references from SSM
/// Parameter Store, using credentials discovered from the ambient AWS
/// environment.
#[cfg(feature = "aws")]
pub async fn from_str<T>(input: &str) -> Result<T>
where
    T: DeserializeOwned + Serialize,
{
    let resolver = SsmResolver::from_env().await;
    from_str_with(input, &resolver).await
}

/// Byte-slice variant of [`from_str`].
#[cfg(feature = "aws")]
pub async fn from_slice<T>(input: &[u8]) -> Result<T>
where
    T: DeserializeOwned + Serialize,
{
    let resolver = SsmResolver::from_env().await;
    from_slice_with(input, &resolver).await
}
