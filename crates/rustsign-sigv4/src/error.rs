//! Signing error types.

use rustsign_core::CoreError;

/// Errors returned by the SigV4 signing path.
///
/// Every failure is reported to the caller; nothing is retried and no
/// `Authorization` header is attached when an error is returned.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// Missing or invalid region, service, credential, or signed header name.
    #[error(transparent)]
    Config(#[from] CoreError),

    /// A header named in the signed set is absent from the request.
    #[error("signed header is missing from the request: {0}")]
    MissingHeader(String),

    /// A signed header carries a value that is not visible ASCII text.
    #[error("signed header has a non-ASCII value: {0}")]
    InvalidHeaderValue(String),

    /// The request body could not be read to completion.
    #[error("failed to read request body: {0}")]
    BodyRead(#[source] std::io::Error),
}

/// Convenience result type for signing operations.
pub type SignResult<T> = Result<T, SignError>;
