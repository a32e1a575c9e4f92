//! Core types, credentials, and error handling for RustSign.
//!
//! This crate provides the building blocks shared by the signing crates:
//! the AWS region and service identifiers that make up a credential scope,
//! the long-term [`Credential`] whose secret must never leave the signing
//! boundary, and the configuration error type.

mod credentials;
mod env;
mod error;
mod types;

pub use credentials::Credential;
pub use env::{env_list, env_var};
pub use error::{CoreError, CoreResult};
pub use types::{AwsRegion, ServiceName};
