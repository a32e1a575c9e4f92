//! Digest and keyed-MAC primitives used throughout signing.
//!
//! The signer never names a hash function directly. It goes through a
//! [`SignatureAlgorithm`], which bundles the algorithm identifier written into
//! the string to sign and the `Authorization` header with the digest used for
//! payload and canonical-request hashes and the MAC used for key derivation
//! and the final signature.

use std::fmt;
use std::sync::Arc;

use hmac::{Hmac, KeyInit, Mac};
use sha2::{Digest, Sha256};

/// Algorithm identifier for HMAC-SHA256 signing.
pub const AWS4_HMAC_SHA256: &str = "AWS4-HMAC-SHA256";

type HmacSha256Mac = Hmac<Sha256>;

/// A digest plus keyed-MAC pair with its SigV4 algorithm identifier.
///
/// Implementations must be deterministic and infallible.
pub trait SignatureAlgorithm: fmt::Debug + Send + Sync {
    /// Identifier rendered into the string to sign and the `Authorization` header.
    fn name(&self) -> &'static str;

    /// Hash `data`.
    fn digest(&self, data: &[u8]) -> Vec<u8>;

    /// Compute the keyed MAC of `data` under `key`.
    fn mac(&self, key: &[u8], data: &[u8]) -> Vec<u8>;

    /// Hash `data` and render the result as lowercase hex.
    fn hex_digest(&self, data: &[u8]) -> String {
        hex::encode(self.digest(data))
    }
}

/// SHA-256 digest with HMAC-SHA256, the standard SigV4 algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HmacSha256;

impl SignatureAlgorithm for HmacSha256 {
    fn name(&self) -> &'static str {
        AWS4_HMAC_SHA256
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        Sha256::digest(data).to_vec()
    }

    fn mac(&self, key: &[u8], data: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256Mac::new_from_slice(key).expect("HMAC can accept any key length");
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }
}

/// The algorithm used when a config does not name one.
#[must_use]
pub fn default_algorithm() -> Arc<dyn SignatureAlgorithm> {
    Arc::new(HmacSha256)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_hash_empty_input_to_known_constant() {
        assert_eq!(
            HmacSha256.hex_digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_should_hash_known_input() {
        assert_eq!(
            HmacSha256.hex_digest(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_should_match_rfc4231_hmac_vector() {
        let mac = HmacSha256.mac(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            hex::encode(mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_should_produce_32_byte_outputs() {
        assert_eq!(HmacSha256.digest(b"data").len(), 32);
        assert_eq!(HmacSha256.mac(b"key", b"data").len(), 32);
    }

    #[test]
    fn test_should_accept_empty_and_long_mac_keys() {
        let long_key = vec![0x5a_u8; 200];
        assert_eq!(HmacSha256.mac(b"", b"data").len(), 32);
        assert_eq!(HmacSha256.mac(&long_key, b"data").len(), 32);
        assert_ne!(HmacSha256.mac(b"", b"data"), HmacSha256.mac(&long_key, b"data"));
    }

    #[test]
    fn test_should_use_hmac_sha256_by_default() {
        assert_eq!(default_algorithm().name(), "AWS4-HMAC-SHA256");
    }
}
