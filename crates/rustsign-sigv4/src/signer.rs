//! Header-based SigV4 request signing.
//!
//! A [`Signer`] binds a validated [`SignerConfig`] to a [`Credential`] and
//! attaches an `Authorization` header of the form:
//!
//! ```text
//! AWS4-HMAC-SHA256 Credential=AKID/20150830/us-east-1/iam/aws4_request, SignedHeaders=host;x-amz-date, Signature=<hex>
//! ```
//!
//! The request must already carry a date header consistent with the signing
//! time (conventionally `x-amz-date`, see
//! [`stamp_request`](crate::string_to_sign::stamp_request)) and that header
//! must be part of the signed set. The signer never adds it.

use chrono::{DateTime, Utc};
use http::header::{AUTHORIZATION, HeaderValue};
use rustsign_core::{CoreError, Credential};
use tracing::debug;

use crate::algorithm::SignatureAlgorithm;
use crate::body::SigningBody;
use crate::canonical::{CanonicalRequest, SignedHeaders};
use crate::config::SignerConfig;
use crate::error::{SignError, SignResult};
use crate::signing_key::{CredentialScope, compute_signature, derive_signing_key};
use crate::string_to_sign::build_string_to_sign;

/// Signs HTTP requests with AWS Signature Version 4.
///
/// Signing takes `&self` and never mutates the signer, so one signer can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct Signer {
    config: SignerConfig,
    credential: Credential,
    signed_headers: SignedHeaders,
}

impl Signer {
    /// Create a signer, validating the config and credential and normalizing
    /// the signed header names.
    ///
    /// # Examples
    ///
    /// ```
    /// use rustsign_core::Credential;
    /// use rustsign_sigv4::{Signer, SignerConfig};
    ///
    /// let config = SignerConfig::builder().region("us-east-1").service("iam").build();
    /// let credential = Credential::new("AKIDEXAMPLE", "secret").unwrap();
    /// let signer = Signer::new(config, credential).unwrap();
    /// assert_eq!(signer.signed_headers().to_string(), "host;x-amz-date");
    /// ```
    pub fn new(config: SignerConfig, credential: Credential) -> SignResult<Self> {
        config.validate()?;
        credential.validate()?;
        let signed_headers = SignedHeaders::new(&config.signed_headers)?;

        Ok(Self {
            config,
            credential,
            signed_headers,
        })
    }

    /// Replace the headers signed by future calls.
    pub fn with_signed_headers<I, S>(mut self, names: I) -> SignResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let signed_headers = SignedHeaders::new(names)?;
        self.config.signed_headers = signed_headers.iter().map(ToOwned::to_owned).collect();
        self.signed_headers = signed_headers;
        Ok(self)
    }

    /// The configuration this signer was built from.
    #[must_use]
    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// The normalized signed header set.
    #[must_use]
    pub fn signed_headers(&self) -> &SignedHeaders {
        &self.signed_headers
    }

    /// The access key id placed in the `Credential=` field.
    #[must_use]
    pub fn access_key_id(&self) -> &str {
        self.credential.access_key_id()
    }

    /// Sign `request` at the current time.
    pub fn sign_request(&self, request: &mut http::Request<SigningBody>) -> SignResult<()> {
        self.sign_request_at(request, Utc::now())
    }

    /// Sign `request` as of `time`, inserting the `Authorization` header.
    ///
    /// Never reads the clock, so identical inputs give identical headers. The
    /// body is read once and replaced with a readable copy of the same bytes
    /// before anything else can fail. Any existing `Authorization` header is
    /// removed first, so on error the request carries none.
    ///
    /// # Errors
    ///
    /// - [`SignError::BodyRead`] if the body could not be read to the end
    /// - [`SignError::MissingHeader`] if a signed header is absent
    /// - [`SignError::InvalidHeaderValue`] if a signed header value is not ASCII
    pub fn sign_request_at(
        &self,
        request: &mut http::Request<SigningBody>,
        time: DateTime<Utc>,
    ) -> SignResult<()> {
        request.headers_mut().remove(AUTHORIZATION);

        let algorithm = self.algorithm();
        let canonical = self.canonical_request(request)?;

        let scope = self.scope(time);
        let string_to_sign = build_string_to_sign(algorithm.name(), time, &scope, canonical.hash());
        debug!(string_to_sign, "Built string to sign");

        let signing_key = derive_signing_key(algorithm, self.credential.secret_access_key(), &scope);
        let signature = self.sign(&signing_key, &string_to_sign);

        let authorization = self.format_authorization(&scope, &signature);
        let value = HeaderValue::from_str(&authorization).map_err(|_| {
            CoreError::Config("authorization value is not a valid header value".to_owned())
        })?;
        request.headers_mut().insert(AUTHORIZATION, value);

        debug!(
            access_key_id = %self.credential.access_key_id(),
            scope = %scope,
            signed_headers = %self.signed_headers,
            "Signed request"
        );

        Ok(())
    }

    /// Build the canonical request this signer would sign.
    ///
    /// Buffers the body the same way [`Signer::sign_request_at`] does.
    pub fn canonical_request(
        &self,
        request: &mut http::Request<SigningBody>,
    ) -> SignResult<CanonicalRequest> {
        let algorithm = self.algorithm();
        let payload = request.body_mut().buffer()?;
        let payload_hash = algorithm.hex_digest(&payload);

        let canonical = CanonicalRequest::new(
            request.method(),
            request.uri(),
            request.headers(),
            &self.signed_headers,
            &payload_hash,
            algorithm,
        )?;

        debug!(canonical_request = canonical.as_str(), "Built canonical request");
        Ok(canonical)
    }

    /// Credential scope for the UTC date of `time`.
    #[must_use]
    pub fn scope(&self, time: DateTime<Utc>) -> CredentialScope {
        CredentialScope::new(time, self.config.region.clone(), self.config.service.clone())
    }

    /// Signing key for the scope of `time`.
    #[must_use]
    pub fn signing_key(&self, time: DateTime<Utc>) -> Vec<u8> {
        derive_signing_key(
            self.algorithm(),
            self.credential.secret_access_key(),
            &self.scope(time),
        )
    }

    /// Hex MAC of `string_to_sign` under `signing_key`.
    #[must_use]
    pub fn sign(&self, signing_key: &[u8], string_to_sign: &str) -> String {
        compute_signature(self.algorithm(), signing_key, string_to_sign)
    }

    /// `Authorization` header value for a signature computed at `time`.
    #[must_use]
    pub fn authorization(&self, signature: &str, time: DateTime<Utc>) -> String {
        self.format_authorization(&self.scope(time), signature)
    }

    fn format_authorization(&self, scope: &CredentialScope, signature: &str) -> String {
        format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            self.algorithm().name(),
            self.credential.access_key_id(),
            scope,
            self.signed_headers,
            signature
        )
    }

    fn algorithm(&self) -> &dyn SignatureAlgorithm {
        self.config.algorithm.as_ref()
    }
}
