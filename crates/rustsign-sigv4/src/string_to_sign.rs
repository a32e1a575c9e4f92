//! String-to-sign construction and request timestamps.
//!
//! ```text
//! Algorithm\n
//! RequestDateTime\n
//! CredentialScope\n
//! HashedCanonicalRequest
//! ```

use chrono::{DateTime, Utc};
use http::HeaderValue;
use http::header::HeaderName;

use crate::signing_key::CredentialScope;

/// ISO 8601 basic format used for request timestamps (`YYYYMMDD'T'HHMMSS'Z'`).
pub const AMZ_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Conventional header carrying the request timestamp.
pub const X_AMZ_DATE: &str = "x-amz-date";

/// Format `time` as a SigV4 request timestamp.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rustsign_sigv4::string_to_sign::format_amz_date;
///
/// let time = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();
/// assert_eq!(format_amz_date(time), "20150830T123600Z");
/// ```
#[must_use]
pub fn format_amz_date(time: DateTime<Utc>) -> String {
    time.format(AMZ_DATE_FORMAT).to_string()
}

/// Build the string to sign from its four components.
#[must_use]
pub fn build_string_to_sign(
    algorithm_id: &str,
    time: DateTime<Utc>,
    scope: &CredentialScope,
    canonical_request_hash: &str,
) -> String {
    let timestamp = format_amz_date(time);
    format!("{algorithm_id}\n{timestamp}\n{scope}\n{canonical_request_hash}")
}

/// Set the `x-amz-date` header to `time`.
///
/// The signer never adds a date header on its own; callers stamp the request
/// with this helper (and list `x-amz-date` among the signed headers) before
/// signing at the same `time`.
pub fn stamp_request<B>(request: &mut http::Request<B>, time: DateTime<Utc>) {
    let value =
        HeaderValue::from_str(&format_amz_date(time)).expect("timestamp is always ASCII");
    request
        .headers_mut()
        .insert(HeaderName::from_static(X_AMZ_DATE), value);
}
