//! AWS Signature Version 4 request signing for RustSign.
//!
//! This crate signs outgoing HTTP requests with a header-based SigV4
//! `Authorization` credential. The long-term secret never leaves the process:
//! it is folded into a signing key scoped to one date, region and service,
//! and only the resulting MAC is sent.
//!
//! # Overview
//!
//! 1. The request body is read once and replaced with a readable copy.
//! 2. The request is reduced to its canonical form and hashed.
//! 3. The hash is combined with the algorithm, timestamp and credential scope
//!    into the string to sign.
//! 4. A signing key is derived from the secret and the scope.
//! 5. The MAC of the string to sign becomes the signature, which is written
//!    into the `Authorization` header.
//!
//! # Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use rustsign_core::Credential;
//! use rustsign_sigv4::{Signer, SignerConfig, SigningBody};
//! use rustsign_sigv4::string_to_sign::stamp_request;
//!
//! let config = SignerConfig::builder()
//!     .region("us-east-1")
//!     .service("iam")
//!     .build();
//! let credential = Credential::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY").unwrap();
//! let signer = Signer::new(config, credential).unwrap();
//!
//! let time = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();
//! let mut request = http::Request::builder()
//!     .uri("https://iam.amazonaws.com/?Action=ListUsers&Version=2010-05-08")
//!     .header("host", "iam.amazonaws.com")
//!     .body(SigningBody::empty())
//!     .unwrap();
//! stamp_request(&mut request, time);
//!
//! signer.sign_request_at(&mut request, time).unwrap();
//! assert!(request.headers().contains_key("authorization"));
//! ```
//!
//! # Modules
//!
//! - [`algorithm`] - Digest and MAC primitives
//! - [`body`] - Request body that survives being hashed
//! - [`canonical`] - Canonical request construction
//! - [`config`] - Signer configuration
//! - [`error`] - Signing error types
//! - [`signer`] - Request signing
//! - [`signing_key`] - Credential scope and key derivation
//! - [`string_to_sign`] - String-to-sign construction and timestamps

pub mod algorithm;
pub mod body;
pub mod canonical;
pub mod config;
pub mod error;
pub mod signer;
pub mod signing_key;
pub mod string_to_sign;

pub use algorithm::{AWS4_HMAC_SHA256, HmacSha256, SignatureAlgorithm, default_algorithm};
pub use body::SigningBody;
pub use canonical::{CanonicalRequest, EMPTY_PAYLOAD_HASH, SignedHeaders};
pub use config::SignerConfig;
pub use error::{SignError, SignResult};
pub use signer::Signer;
pub use signing_key::{CredentialScope, compute_signature, derive_signing_key};
