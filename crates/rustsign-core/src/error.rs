//! Error types for the RustSign core.

/// Core error type for RustSign configuration and credentials.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Missing or invalid region, service, credential, or signed header name.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for RustSign core operations.
pub type CoreResult<T> = Result<T, CoreError>;
