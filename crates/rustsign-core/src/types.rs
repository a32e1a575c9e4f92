//! Identifiers that make up a SigV4 credential scope.

use std::fmt;

/// AWS Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// Region used when nothing else is configured.
    pub const DEFAULT: &'static str = "us-east-1";

    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the region is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AwsRegion {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AwsRegion {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Signing name of the target service (e.g. `iam`, `s3`, `sqs`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ServiceName(String);

impl ServiceName {
    /// Create a new service name.
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self(service.into())
    }

    /// Get the service name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the service name is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ServiceName {
    fn from(value: String) -> Self {
        Self(value)
    }
}
