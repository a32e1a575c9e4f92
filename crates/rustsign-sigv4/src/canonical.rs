//! Canonical request construction for AWS Signature Version 4.
//!
//! This module implements the canonical request format as specified by AWS:
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n
//! SignedHeaders\n
//! HashedPayload
//! ```
//!
//! Every line of `CanonicalHeaders` ends with its own newline, so the headers
//! block is followed by an empty line. Each component is normalized so that
//! the signer and the verifier hash exactly the same bytes.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use http::{HeaderMap, Method, Uri};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode};
use rustsign_core::CoreError;

use crate::algorithm::SignatureAlgorithm;
use crate::error::{SignError, SignResult};

/// The set of characters that must be percent-encoded in path segments and
/// query components.
///
/// Everything except the unreserved characters (A-Z, a-z, 0-9, `-`, `_`,
/// `.`, `~`) is encoded.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Payload hash of an empty body (SHA-256 of the empty string).
pub const EMPTY_PAYLOAD_HASH: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Normalized set of header names bound into a signature.
///
/// Names are trimmed, lowercased, deduplicated and kept sorted, so the same
/// value renders both the canonical headers block and the `SignedHeaders`
/// list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedHeaders(BTreeSet<String>);

impl SignedHeaders {
    /// Normalize a caller-supplied list of header names.
    ///
    /// The input is only read; a normalized copy is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rustsign_sigv4::SignedHeaders;
    ///
    /// let signed = SignedHeaders::new(["X-Amz-Date", " Host ", "host"]).unwrap();
    /// assert_eq!(signed.to_string(), "host;x-amz-date");
    /// ```
    pub fn new<I, S>(names: I) -> SignResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(CoreError::Config("signed header name is empty".to_owned()).into());
            }
            set.insert(name.to_ascii_lowercase());
        }
        Ok(Self(set))
    }

    /// Iterate over the names in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Whether `name` (already lowercase) is in the set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Number of signed headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no header is signed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SignedHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

/// A canonical request together with its hex-encoded hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    text: String,
    hash: String,
}

impl CanonicalRequest {
    /// Canonicalize a request.
    ///
    /// `payload_hash` is the lowercase hex digest of the full body.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::MissingHeader`] when a signed header is absent
    /// from `headers`, and [`SignError::InvalidHeaderValue`] when one of its
    /// values is not visible ASCII.
    ///
    /// # Examples
    ///
    /// ```
    /// use rustsign_sigv4::{CanonicalRequest, HmacSha256, SignedHeaders, EMPTY_PAYLOAD_HASH};
    ///
    /// let mut headers = http::HeaderMap::new();
    /// headers.insert("host", "example.amazonaws.com".parse().unwrap());
    ///
    /// let canonical = CanonicalRequest::new(
    ///     &http::Method::GET,
    ///     &"/".parse().unwrap(),
    ///     &headers,
    ///     &SignedHeaders::new(["host"]).unwrap(),
    ///     EMPTY_PAYLOAD_HASH,
    ///     &HmacSha256,
    /// )
    /// .unwrap();
    /// assert!(canonical.as_str().starts_with("GET\n/\n\nhost:example.amazonaws.com\n\nhost\n"));
    /// ```
    pub fn new(
        method: &Method,
        uri: &Uri,
        headers: &HeaderMap,
        signed_headers: &SignedHeaders,
        payload_hash: &str,
        algorithm: &dyn SignatureAlgorithm,
    ) -> SignResult<Self> {
        let method = method.as_str().to_ascii_uppercase();
        let canonical_uri = build_canonical_uri(uri.path());
        let canonical_query = build_canonical_query_string(uri.query().unwrap_or(""));
        let canonical_headers = build_canonical_headers(headers, signed_headers)?;

        let text = format!(
            "{method}\n{canonical_uri}\n{canonical_query}\n{canonical_headers}\n{signed_headers}\n{payload_hash}"
        );
        let hash = algorithm.hex_digest(text.as_bytes());

        Ok(Self { text, hash })
    }

    /// The canonical request text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lowercase hex digest of the canonical request text.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Build the canonical URI by URI-encoding each path segment individually.
///
/// Forward slashes (`/`) are preserved. Empty paths are normalized to `/`.
/// Segments are decoded first, so an already-encoded path is not encoded twice.
///
/// # Examples
///
/// ```
/// use rustsign_sigv4::canonical::build_canonical_uri;
///
/// assert_eq!(build_canonical_uri("/test.txt"), "/test.txt");
/// assert_eq!(build_canonical_uri("/"), "/");
/// assert_eq!(build_canonical_uri(""), "/");
/// ```
#[must_use]
pub fn build_canonical_uri(path: &str) -> String {
    if path.is_empty() || path == "/" {
        return "/".to_owned();
    }

    let encoded = path
        .split('/')
        .map(uri_encode)
        .collect::<Vec<_>>()
        .join("/");

    if encoded.starts_with('/') {
        encoded
    } else {
        format!("/{encoded}")
    }
}

/// Build the canonical query string.
///
/// Each parameter name and value is decoded and then re-encoded with the
/// unreserved character set. Pairs are sorted by encoded name, then by encoded
/// value. A parameter without a value renders as `name=`.
///
/// # Examples
///
/// ```
/// use rustsign_sigv4::canonical::build_canonical_query_string;
///
/// assert_eq!(build_canonical_query_string(""), "");
/// assert_eq!(build_canonical_query_string("b=2&a=1"), "a=1&b=2");
/// assert_eq!(build_canonical_query_string("acl"), "acl=");
/// ```
#[must_use]
pub fn build_canonical_query_string(query: &str) -> String {
    if query.is_empty() {
        return String::new();
    }

    let mut params: Vec<(String, String)> = query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|param| {
            let (name, value) = param.split_once('=').unwrap_or((param, ""));
            (uri_encode(name), uri_encode(value))
        })
        .collect();

    params.sort_unstable();

    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the canonical headers block from the request headers.
///
/// Only headers listed in `signed_headers` are included, one `name:value\n`
/// line each, sorted by name. Values are trimmed and runs of whitespace are
/// collapsed to a single space. Repeated headers are joined with `,` in the
/// order they appear on the request.
///
/// # Examples
///
/// ```
/// use http::HeaderName;
/// use rustsign_sigv4::SignedHeaders;
/// use rustsign_sigv4::canonical::build_canonical_headers;
///
/// let mut headers = http::HeaderMap::new();
/// headers.append(HeaderName::from_bytes(b"X-Foo").unwrap(), "a".parse().unwrap());
/// headers.append(HeaderName::from_bytes(b"x-foo").unwrap(), "  b   c ".parse().unwrap());
///
/// let signed = SignedHeaders::new(["X-Foo"]).unwrap();
/// assert_eq!(build_canonical_headers(&headers, &signed).unwrap(), "x-foo:a,b c\n");
/// ```
pub fn build_canonical_headers(
    headers: &HeaderMap,
    signed_headers: &SignedHeaders,
) -> SignResult<String> {
    let mut canonical = String::new();

    for name in signed_headers.iter() {
        let values = headers.get_all(name).iter().collect::<Vec<_>>();
        if values.is_empty() {
            return Err(SignError::MissingHeader(name.to_owned()));
        }

        let mut joined = Vec::with_capacity(values.len());
        for value in values {
            let value = value
                .to_str()
                .map_err(|_| SignError::InvalidHeaderValue(name.to_owned()))?;
            joined.push(collapse_whitespace(value.trim()));
        }

        canonical.push_str(name);
        canonical.push(':');
        canonical.push_str(&joined.join(","));
        canonical.push('\n');
    }

    Ok(canonical)
}

/// Decode a path segment or query component, then encode it with the SigV4
/// rules.
fn uri_encode(input: &str) -> String {
    let decoded: Cow<'_, [u8]> = percent_decode_str(input).into();
    percent_encode(&decoded, URI_ENCODE_SET).to_string()
}

/// Collapse consecutive whitespace characters in a string to a single space.
fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(ch);
            prev_was_space = false;
        }
    }
    result
}
