//! Signer configuration.
//!
//! Provides [`SignerConfig`], the read-only settings a [`Signer`](crate::Signer)
//! is built from. Values can be assembled with the typed builder, deserialized
//! from JSON, or loaded from environment variables.

use std::sync::Arc;

use rustsign_core::{AwsRegion, CoreError, CoreResult, ServiceName, env_list, env_var};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::algorithm::{SignatureAlgorithm, default_algorithm};

/// Headers signed when the caller does not choose a set.
pub const DEFAULT_SIGNED_HEADERS: &[&str] = &["host", "x-amz-date"];

/// Settings for a SigV4 signer.
///
/// The signer treats this value as read-only: signing never touches
/// `signed_headers` or `algorithm`.
///
/// # Examples
///
/// ```
/// use rustsign_sigv4::SignerConfig;
///
/// let config = SignerConfig::builder()
///     .region("us-east-1")
///     .service("iam")
///     .build();
/// assert_eq!(config.signed_headers, vec!["host", "x-amz-date"]);
/// assert_eq!(config.algorithm.name(), "AWS4-HMAC-SHA256");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct SignerConfig {
    /// Region the signing key is scoped to.
    #[serde(default)]
    #[builder(default, setter(into))]
    pub region: AwsRegion,

    /// Signing name of the target service.
    #[builder(setter(into))]
    pub service: ServiceName,

    /// Names of the headers bound into the signature, in any case and order.
    #[serde(default = "default_signed_headers")]
    #[builder(default = default_signed_headers())]
    pub signed_headers: Vec<String>,

    /// Digest and MAC pair. Defaults to HMAC-SHA256.
    #[serde(skip, default = "default_algorithm")]
    #[builder(default = default_algorithm())]
    pub algorithm: Arc<dyn SignatureAlgorithm>,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            region: AwsRegion::default(),
            service: ServiceName::default(),
            signed_headers: default_signed_headers(),
            algorithm: default_algorithm(),
        }
    }
}

impl SignerConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `AWS_REGION`, then `AWS_DEFAULT_REGION` | `us-east-1` |
    /// | `SIGV4_SERVICE` | *(empty, must be set before signing)* |
    /// | `SIGV4_SIGNED_HEADERS` | `host,x-amz-date` |
    ///
    /// # Examples
    ///
    /// ```
    /// use rustsign_sigv4::SignerConfig;
    ///
    /// let config = SignerConfig::from_env();
    /// assert!(!config.region.is_empty());
    /// ```
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_var(&["AWS_REGION", "AWS_DEFAULT_REGION"]) {
            config.region = AwsRegion::new(v);
        }
        if let Some(v) = env_var(&["SIGV4_SERVICE"]) {
            config.service = ServiceName::new(v);
        }
        if let Some(v) = env_list("SIGV4_SIGNED_HEADERS") {
            config.signed_headers = v;
        }

        config
    }

    /// Check that the region and service are set.
    pub fn validate(&self) -> CoreResult<()> {
        if self.region.is_empty() {
            return Err(CoreError::Config("region is not set".to_owned()));
        }
        if self.service.is_empty() {
            return Err(CoreError::Config("service is not set".to_owned()));
        }
        Ok(())
    }
}

fn default_signed_headers() -> Vec<String> {
    DEFAULT_SIGNED_HEADERS
        .iter()
        .map(|name| (*name).to_owned())
        .collect()
}
