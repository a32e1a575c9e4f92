//! Integration tests for RustSign request signing.
//!
//! The scenarios replay cases from the published AWS SigV4 test suite, which
//! all sign at `2015-08-30T12:36:00Z` in `us-east-1` with the example
//! credential below, and exercise the signer end to end through
//! `http::Request`.
//!
//! Run them with:
//! ```text
//! cargo test -p rustsign-integration
//! ```

use std::sync::Once;

use chrono::{DateTime, TimeZone, Utc};
use rustsign_core::Credential;
use rustsign_sigv4::{Signer, SignerConfig, SigningBody};

static INIT: Once = Once::new();

/// Access key id used by the AWS test suite.
pub const SUITE_ACCESS_KEY: &str = "AKIDEXAMPLE";

/// Secret access key used by the AWS test suite.
pub const SUITE_SECRET_KEY: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

/// Host header used by the AWS test suite.
pub const SUITE_HOST: &str = "example.amazonaws.com";

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// The fixed signing time of the AWS test suite.
#[must_use]
pub fn suite_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0)
        .single()
        .expect("valid suite time")
}

/// Create a signer for `service` in `us-east-1` with the suite credential.
pub fn suite_signer(service: &str, signed_headers: &[&str]) -> anyhow::Result<Signer> {
    init_tracing();

    let config = SignerConfig::builder()
        .region("us-east-1")
        .service(service)
        .signed_headers(signed_headers.iter().map(|h| (*h).to_owned()).collect())
        .build();
    let credential = Credential::new(SUITE_ACCESS_KEY, SUITE_SECRET_KEY)?;

    Ok(Signer::new(config, credential)?)
}

/// Start a request against the suite host.
#[must_use]
pub fn suite_request(method: &str, path_and_query: &str) -> http::request::Builder {
    http::Request::builder()
        .method(method)
        .uri(format!("https://{SUITE_HOST}{path_and_query}"))
        .header("Host", SUITE_HOST)
}

/// The `Authorization` header of a signed request.
pub fn authorization(request: &http::Request<SigningBody>) -> anyhow::Result<String> {
    let value = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| anyhow::anyhow!("request has no authorization header"))?;
    Ok(value.to_str()?.to_owned())
}

mod test_aws_suite;
mod test_signing;
