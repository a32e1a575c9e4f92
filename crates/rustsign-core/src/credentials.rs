//! Long-term signing credentials.
//!
//! A [`Credential`] pairs a public access key id with its secret. The secret
//! only ever feeds signing-key derivation. `Debug` redacts it and the type
//! has no `Serialize` implementation.

use std::fmt;

use crate::error::{CoreError, CoreResult};

/// An access key id and its secret access key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    access_key_id: String,
    secret_access_key: String,
}

impl Credential {
    /// Create a credential, rejecting blank parts and access key ids that
    /// cannot appear inside an `Authorization` header.
    ///
    /// # Examples
    ///
    /// ```
    /// use rustsign_core::Credential;
    ///
    /// let credential = Credential::new("AKIDEXAMPLE", "secret").unwrap();
    /// assert_eq!(credential.access_key_id(), "AKIDEXAMPLE");
    /// assert!(Credential::new("", "secret").is_err());
    /// ```
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> CoreResult<Self> {
        let credential = Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        };
        credential.validate()?;
        Ok(credential)
    }

    /// Check that both parts are present and that the access key id is
    /// printable ASCII without spaces, commas or slashes.
    pub fn validate(&self) -> CoreResult<()> {
        if self.access_key_id.is_empty() {
            return Err(CoreError::Config("access key id is empty".to_owned()));
        }
        if self.secret_access_key.is_empty() {
            return Err(CoreError::Config("secret access key is empty".to_owned()));
        }
        let invalid = self
            .access_key_id
            .bytes()
            .any(|b| !b.is_ascii_graphic() || b == b',' || b == b'/');
        if invalid {
            return Err(CoreError::Config(format!(
                "access key id {:?} contains characters not allowed in a credential",
                self.access_key_id
            )));
        }
        Ok(())
    }

    /// The public access key id.
    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// The secret access key. Only key derivation should read this.
    #[must_use]
    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}
