//! AWS SSM Parameter Store resolver backend.
//!
//! Fetches parameters from AWS Systems Manager Parameter Store with
//! decryption enabled, so `SecureString` parameters arrive in plaintext.
//!
//! ## Configuration
//!
//! Credentials and region come from the standard AWS environment: the
//! default provider chain checks (in order) environment variables, the
//! shared config/credentials files, and instance/container metadata. The
//! resolver itself reads nothing beyond what `aws-config` discovers.
//!
//! ## Reference Format
//!
//! The identifier is passed to `GetParameter` verbatim, so both plain names
//! (`my-parameter`) and hierarchical paths (`/prod/db/password`) work.

use async_trait::async_trait;
use aws_sdk_ssm::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_ssm::operation::get_parameter::GetParameterError;
use tracing::debug;

use super::error::{Result, SecretsError};
use super::resolver::SecretResolver;

/// AWS SSM Parameter Store backend.
///
/// Each [`resolve`](SecretResolver::resolve) call issues one `GetParameter`
/// request with `with_decryption = true`. There is no caching and no retry
/// beyond what the SDK's default retry policy provides.
#[derive(Debug, Clone)]
pub struct SsmResolver {
    client: aws_sdk_ssm::Client,
}

impl SsmResolver {
    /// Creates a resolver from an existing SSM client.
    ///
    /// Useful when the caller already holds a configured client or wants to
    /// point the resolver at a non-default endpoint (e.g. localstack).
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }

    /// Creates a resolver bound to the ambient AWS environment.
    ///
    /// Region and credentials are discovered through the default provider
    /// chain (environment variables, shared config files, instance metadata).
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_ssm::Client::new(&config))
    }
}

#[async_trait]
impl SecretResolver for SsmResolver {
    async fn resolve(&self, name: &str) -> Result<String> {
        debug!(parameter = %name, "fetching parameter from SSM");

        let response = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|err| classify_sdk_error(name, err))?;

        response
            .parameter
            .and_then(|parameter| parameter.value)
            .ok_or_else(|| SecretsError::backend_error(format!(
                "GetParameter response for '{}' carried no value",
                name
            )))
    }
}

/// Maps SDK failures onto the resolver error taxonomy.
///
/// Not-found and access-denied are surfaced distinctly; everything else from
/// the service is a backend error, and anything that never reached the
/// service (dispatch, timeout, TLS) is a connection failure.
fn classify_sdk_error<R>(name: &str, err: SdkError<GetParameterError, R>) -> SecretsError {
    match err {
        SdkError::ServiceError(ctx) => {
            let service_err = ctx.err();
            if matches!(
                service_err,
                GetParameterError::ParameterNotFound(_)
                    | GetParameterError::ParameterVersionNotFound(_)
            ) {
                SecretsError::not_found(name)
            } else if service_err.code() == Some("AccessDeniedException") {
                SecretsError::access_denied(name)
            } else {
                SecretsError::backend_error(format!(
                    "GetParameter failed for '{}': {}",
                    name, service_err
                ))
            }
        }
        other => SecretsError::connection_failed(other.to_string()),
    }
}
