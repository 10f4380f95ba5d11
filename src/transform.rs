//! Placeholder substitution over decoded configuration values.
//!
//! This module implements the copy-and-substitute pass that turns a decoded
//! document containing `ssm://` references into its fully materialized form.
//! The decoded value graph is classified by shape kind (the closed variant
//! set of [`serde_yaml::Value`]) and rebuilt depth-first: string leaves
//! carrying the reserved scheme are replaced by resolver output, everything
//! else is copied verbatim.
//!
//! # Atomicity
//!
//! [`transform`] never mutates the caller's value while walking it. It reads
//! a serialized view of the target, builds a fresh replacement graph, and
//! installs the replacement with a single assignment only after the entire
//! walk has succeeded. If any leaf fails to resolve, the caller's value is
//! exactly what it was before the call; a half-substituted configuration is
//! never observable.

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::errors::Result;
use crate::secrets::SecretResolver;

/// Reserved scheme marking a string scalar as a secret reference.
pub const SECRET_SCHEME: &str = "ssm://";

/// Replaces every `ssm://` string leaf in `target` with resolver output.
///
/// `target` is any value that round-trips through serde: the same struct,
/// map, or [`serde_yaml::Value`] the deserializer just populated. The walk
/// visits every reachable string leaf exactly once, in document order, and
/// awaits each resolution before moving on. Mapping keys are never examined,
/// even when the key type is a string.
///
/// On success `target` holds the substituted configuration; on any failure
/// it is left untouched and the first error is returned.
///
/// # Errors
///
/// - [`Error::Resolution`](crate::Error::Resolution) if the resolver fails
///   for any leaf; remaining leaves are not visited
/// - [`Error::Decode`](crate::Error::Decode) if `target` cannot be
///   serialized into a value graph, or the substituted graph no longer fits
///   the target's declared shape
pub async fn transform<T>(target: &mut T, resolver: &dyn SecretResolver) -> Result<()>
where
    T: Serialize + DeserializeOwned,
{
    let source = serde_yaml::to_value(&*target)?;
    let replacement = substitute(&source, resolver).await?;
    *target = serde_yaml::from_value(replacement)?;
    Ok(())
}

/// Builds the substituted copy of `original`, depth-first.
///
/// Reads only from `original` and allocates the replacement fresh, so the
/// source graph is never aliased by the graph under construction. Boxed
/// because async recursion needs an indirection for the future type.
fn substitute<'a>(
    original: &'a Value,
    resolver: &'a dyn SecretResolver,
) -> BoxFuture<'a, Result<Value>> {
    Box::pin(async move {
        match original {
            Value::String(raw) => match raw.strip_prefix(SECRET_SCHEME) {
                Some(name) => {
                    debug!(parameter = %name, "resolving secret reference");
                    let resolved = resolver.resolve(name).await?;
                    Ok(Value::String(resolved))
                }
                None => Ok(Value::String(raw.clone())),
            },
            Value::Sequence(items) => {
                let mut rebuilt = Vec::with_capacity(items.len());
                for item in items {
                    rebuilt.push(substitute(item, resolver).await?);
                }
                Ok(Value::Sequence(rebuilt))
            }
            Value::Mapping(entries) => {
                // Keys pass through untouched; only values are substituted.
                let mut rebuilt = Mapping::with_capacity(entries.len());
                for (key, value) in entries {
                    rebuilt.insert(key.clone(), substitute(value, resolver).await?);
                }
                Ok(Value::Mapping(rebuilt))
            }
            Value::Tagged(tagged) => {
                let value = substitute(&tagged.value, resolver).await?;
                Ok(Value::Tagged(Box::new(TaggedValue { tag: tagged.tag.clone(), value })))
            }
            // Null, Bool, Number: nothing to inspect.
            other => Ok(other.clone()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::{self, SecretsError};
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Table-backed resolver that counts invocations.
    struct StaticResolver {
        values: HashMap<String, String>,
        calls: AtomicUsize,
    }

    impl StaticResolver {
        fn new(pairs: &[(&str, &str)]) -> Self {
            Self {
                values: pairs
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SecretResolver for StaticResolver {
        async fn resolve(&self, name: &str) -> secrets::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.values.get(name).cloned().ok_or_else(|| SecretsError::not_found(name))
        }
    }

    fn decrypting_resolver() -> StaticResolver {
        StaticResolver::new(&[("encrypt_parameter", "decrypted")])
    }

    #[tokio::test]
    async fn test_plain_string_passes_through() {
        let resolver = decrypting_resolver();
        let mut value = String::from("a");

        transform(&mut value, &resolver).await.unwrap();

        assert_eq!(value, "a");
        assert_eq!(resolver.calls(), 0);
    }

    #[tokio::test]
    async fn test_reference_is_replaced() {
        let resolver = decrypting_resolver();
        let mut value = String::from("ssm://encrypt_parameter");

        transform(&mut value, &resolver).await.unwrap();

        assert_eq!(value, "decrypted");
        assert_eq!(resolver.calls(), 1);
    }

    #[tokio::test]
    async fn test_struct_fields_are_substituted() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Config {
            a: String,
            b: String,
            retries: u32,
        }

        let resolver = decrypting_resolver();
        let mut config = Config {
            a: "a".to_string(),
            b: "ssm://encrypt_parameter".to_string(),
            retries: 3,
        };

        transform(&mut config, &resolver).await.unwrap();

        assert_eq!(
            config,
            Config { a: "a".to_string(), b: "decrypted".to_string(), retries: 3 }
        );
    }

    #[tokio::test]
    async fn test_sequence_elements_in_order() {
        let resolver = decrypting_resolver();
        let mut value = vec!["b".to_string(), "ssm://encrypt_parameter".to_string()];

        transform(&mut value, &resolver).await.unwrap();

        assert_eq!(value, vec!["b".to_string(), "decrypted".to_string()]);
    }

    #[tokio::test]
    async fn test_mapping_values_are_substituted() {
        let resolver = decrypting_resolver();
        let mut plain: HashMap<String, String> =
            HashMap::from([("seq".to_string(), "a".to_string())]);
        let mut with_reference: HashMap<String, String> =
            HashMap::from([("seq".to_string(), "ssm://encrypt_parameter".to_string())]);

        transform(&mut plain, &resolver).await.unwrap();
        transform(&mut with_reference, &resolver).await.unwrap();

        assert_eq!(plain["seq"], "a");
        assert_eq!(with_reference["seq"], "decrypted");
    }

    #[tokio::test]
    async fn test_mapping_keys_are_never_substituted() {
        let resolver = decrypting_resolver();
        let mut value: Value =
            serde_yaml::from_str("ssm://encrypt_parameter: ssm://encrypt_parameter").unwrap();

        transform(&mut value, &resolver).await.unwrap();

        let entries = value.as_mapping().unwrap();
        let (key, val) = entries.iter().next().unwrap();
        assert_eq!(key.as_str(), Some("ssm://encrypt_parameter"));
        assert_eq!(val.as_str(), Some("decrypted"));
        assert_eq!(resolver.calls(), 1);
    }

    #[tokio::test]
    async fn test_null_leaves_are_preserved() {
        let resolver = decrypting_resolver();
        let mut value: Value = serde_yaml::from_str("empty:").unwrap();

        transform(&mut value, &resolver).await.unwrap();

        assert_eq!(value.get("empty"), Some(&Value::Null));
        assert_eq!(resolver.calls(), 0);
    }

    #[tokio::test]
    async fn test_absent_optional_passes_through() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Config {
            present: Option<String>,
            absent: Option<String>,
        }

        let resolver = decrypting_resolver();
        let mut config =
            Config { present: Some("ssm://encrypt_parameter".to_string()), absent: None };

        transform(&mut config, &resolver).await.unwrap();

        assert_eq!(config.present.as_deref(), Some("decrypted"));
        assert_eq!(config.absent, None);
    }

    #[tokio::test]
    async fn test_tagged_value_keeps_its_tag() {
        let resolver = decrypting_resolver();
        let mut value: Value =
            serde_yaml::from_str("!vault ssm://encrypt_parameter").unwrap();

        transform(&mut value, &resolver).await.unwrap();

        match value {
            Value::Tagged(tagged) => {
                assert_eq!(tagged.tag.to_string(), "!vault");
                assert_eq!(tagged.value.as_str(), Some("decrypted"));
            }
            other => panic!("expected tagged value, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_string_scalars_are_untouched() {
        let resolver = decrypting_resolver();
        let mut value: Value =
            serde_yaml::from_str("port: 5432\ntls: true\nratio: 0.5\nname: plain").unwrap();
        let before = value.clone();

        transform(&mut value, &resolver).await.unwrap();

        assert_eq!(value, before);
        assert_eq!(resolver.calls(), 0);
    }

    #[tokio::test]
    async fn test_failure_aborts_walk_immediately() {
        let resolver = decrypting_resolver();
        let mut value: Value =
            serde_yaml::from_str("first: ssm://unknown\nsecond: ssm://encrypt_parameter")
                .unwrap();

        let err = transform(&mut value, &resolver).await.unwrap_err();

        assert!(err.is_resolution());
        // The walk stops at the failing leaf; the second reference is never
        // presented to the resolver.
        assert_eq!(resolver.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_walk_leaves_target_untouched() {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        struct Config {
            good: String,
            bad: String,
        }

        let resolver = decrypting_resolver();
        let mut config = Config {
            good: "ssm://encrypt_parameter".to_string(),
            bad: "ssm://unknown".to_string(),
        };
        let before = config.clone();

        let result = transform(&mut config, &resolver).await;

        assert!(result.is_err());
        assert_eq!(config, before);
    }

    #[tokio::test]
    async fn test_deep_nesting_reaches_every_leaf() {
        let resolver = StaticResolver::new(&[
            ("one", "1"),
            ("two", "2"),
            ("three", "3"),
        ]);
        let document = r#"
outer:
  - name: ssm://one
    values: [plain, "ssm://two"]
  - nested:
      inner: !wrap ssm://three
"#;
        let mut value: Value = serde_yaml::from_str(document).unwrap();

        transform(&mut value, &resolver).await.unwrap();

        let rendered = serde_yaml::to_string(&value).unwrap();
        assert!(rendered.contains("name: '1'"));
        assert!(rendered.contains("'2'"));
        assert!(rendered.contains("'3'"));
        assert!(!rendered.contains("ssm://"));
        assert_eq!(resolver.calls(), 3);
    }
}
