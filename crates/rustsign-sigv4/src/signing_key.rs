//! Credential scope and signing-key derivation.
//!
//! The signing key is never the secret itself. It is folded out of the secret
//! through one keyed MAC per scope component:
//!
//! ```text
//! kDate    = MAC("AWS4" + secret, date)
//! kRegion  = MAC(kDate, region)
//! kService = MAC(kRegion, service)
//! kSigning = MAC(kService, "aws4_request")
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use rustsign_core::{AwsRegion, ServiceName};

use crate::algorithm::SignatureAlgorithm;

/// Prefix prepended to the secret before the first MAC.
pub const KEY_PREFIX: &str = "AWS4";

/// Final scope component identifying the SigV4 protocol version.
pub const SCOPE_TERMINATOR: &str = "aws4_request";

/// Date format of the scope's date component.
pub const SCOPE_DATE_FORMAT: &str = "%Y%m%d";

/// The (date, region, service) window a signing key is valid for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialScope {
    date: String,
    region: AwsRegion,
    service: ServiceName,
}

impl CredentialScope {
    /// Build the scope for the UTC date of `time`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use rustsign_sigv4::CredentialScope;
    ///
    /// let time = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();
    /// let scope = CredentialScope::new(time, "us-east-1".into(), "iam".into());
    /// assert_eq!(scope.to_string(), "20150830/us-east-1/iam/aws4_request");
    /// ```
    #[must_use]
    pub fn new(time: DateTime<Utc>, region: AwsRegion, service: ServiceName) -> Self {
        Self {
            date: time.format(SCOPE_DATE_FORMAT).to_string(),
            region,
            service,
        }
    }

    /// The `YYYYMMDD` date component.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// The region component.
    #[must_use]
    pub fn region(&self) -> &AwsRegion {
        &self.region
    }

    /// The service component.
    #[must_use]
    pub fn service(&self) -> &ServiceName {
        &self.service
    }
}

impl fmt::Display for CredentialScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{SCOPE_TERMINATOR}",
            self.date, self.region, self.service
        )
    }
}

/// Derive the signing key for `scope` from the long-term secret.
///
/// Pure: the same algorithm, secret and scope always yield the same bytes.
#[must_use]
pub fn derive_signing_key(
    algorithm: &dyn SignatureAlgorithm,
    secret_key: &str,
    scope: &CredentialScope,
) -> Vec<u8> {
    let mut initial_key = Vec::with_capacity(KEY_PREFIX.len() + secret_key.len());
    initial_key.extend_from_slice(KEY_PREFIX.as_bytes());
    initial_key.extend_from_slice(secret_key.as_bytes());

    [
        scope.date(),
        scope.region().as_str(),
        scope.service().as_str(),
        SCOPE_TERMINATOR,
    ]
    .iter()
    .fold(initial_key, |key, component| {
        algorithm.mac(&key, component.as_bytes())
    })
}

/// Sign `string_to_sign` with a derived key, returning lowercase hex.
#[must_use]
pub fn compute_signature(
    algorithm: &dyn SignatureAlgorithm,
    signing_key: &[u8],
    string_to_sign: &str,
) -> String {
    hex::encode(algorithm.mac(signing_key, string_to_sign.as_bytes()))
}
