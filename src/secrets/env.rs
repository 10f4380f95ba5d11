//! Environment variable resolver backend.
//!
//! A simple resolver that reads from environment variables. It's intended
//! for **development and testing only** - NOT for production use.
//!
//! # Security Warning
//!
//! Environment variables are NOT secure for production secrets:
//! - Visible in process listings (`ps aux`)
//! - Stored in shell history
//! - No encryption at rest
//! - No audit trail
//!
//! Use the SSM Parameter Store backend for production.
//!
//! # Usage
//!
//! Parameters are read from environment variables with the
//! `SSMCONFIG_SECRET_` prefix. Parameter names are uppercased and any
//! character outside `[A-Za-z0-9]` becomes an underscore:
//!
//! ```bash
//! export SSMCONFIG_SECRET_PROD_DB_PASSWORD="hunter2"
//! ```
//!
//! resolves the reference `ssm://prod/db/password`.

use async_trait::async_trait;
use std::env;

use super::error::{Result, SecretsError};
use super::resolver::SecretResolver;

/// Environment variable prefix for secrets.
const SECRET_PREFIX: &str = "SSMCONFIG_SECRET_";

/// Environment variable resolver backend (development only).
///
/// Reads parameter values from environment variables with the
/// `SSMCONFIG_SECRET_` prefix. Missing variables surface as
/// [`SecretsError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct EnvVarResolver {
    // No internal state needed - reads directly from env
}

impl EnvVarResolver {
    /// Creates a new environment variable resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a parameter name to the environment variable name.
    ///
    /// Path separators and other punctuation are flattened to underscores so
    /// that SSM-style hierarchical names stay addressable from a shell.
    fn name_to_env_var(name: &str) -> String {
        let sanitized: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
            .collect();
        format!("{}{}", SECRET_PREFIX, sanitized)
    }
}

#[async_trait]
impl SecretResolver for EnvVarResolver {
    async fn resolve(&self, name: &str) -> Result<String> {
        let env_var = Self::name_to_env_var(name);

        env::var(&env_var).map_err(|_| {
            SecretsError::not_found(format!(
                "'{}' not found in environment (looking for {})",
                name, env_var
            ))
        })
    }
}
