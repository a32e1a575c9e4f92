//! Cases from the AWS SigV4 test suite.

#[cfg(test)]
mod tests {
    use rustsign_sigv4::SigningBody;
    use rustsign_sigv4::string_to_sign::stamp_request;

    use crate::{authorization, suite_request, suite_signer, suite_time};

    fn expected(signed_headers: &str, signature: &str) -> String {
        format!(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/service/aws4_request, \
             SignedHeaders={signed_headers}, Signature={signature}"
        )
    }

    #[test]
    fn test_should_sign_get_vanilla() -> anyhow::Result<()> {
        let signer = suite_signer("service", &["host", "x-amz-date"])?;
        let mut request = suite_request("GET", "/").body(SigningBody::empty())?;
        stamp_request(&mut request, suite_time());

        signer.sign_request_at(&mut request, suite_time())?;

        assert_eq!(
            authorization(&request)?,
            expected(
                "host;x-amz-date",
                "5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31"
            )
        );
        Ok(())
    }

    #[test]
    fn test_should_sign_get_vanilla_query_order_key_case() -> anyhow::Result<()> {
        let signer = suite_signer("service", &["host", "x-amz-date"])?;
        let mut request =
            suite_request("GET", "/?Param2=value2&Param1=value1").body(SigningBody::empty())?;
        stamp_request(&mut request, suite_time());

        let canonical = signer.canonical_request(&mut request)?;
        assert!(canonical.as_str().contains("\nParam1=value1&Param2=value2\n"));

        signer.sign_request_at(&mut request, suite_time())?;

        assert_eq!(
            authorization(&request)?,
            expected(
                "host;x-amz-date",
                "b97d918cfa904a5beff61c982a1b6f458b799221646efd99d3219ec94cdf2500"
            )
        );
        Ok(())
    }

    #[test]
    fn test_should_sign_post_x_www_form_urlencoded() -> anyhow::Result<()> {
        let signer = suite_signer("service", &["content-type", "host", "x-amz-date"])?;
        let mut request = suite_request("POST", "/")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(SigningBody::from("Param1=value1"))?;
        stamp_request(&mut request, suite_time());

        signer.sign_request_at(&mut request, suite_time())?;

        assert_eq!(
            authorization(&request)?,
            expected(
                "content-type;host;x-amz-date",
                "ff11897932ad3f4e8b18135d722051e5ac45fc38421b1da7b9d196a0fe09473a"
            )
        );
        Ok(())
    }

    #[test]
    fn test_should_sign_get_header_key_duplicate() -> anyhow::Result<()> {
        let signer = suite_signer("service", &["host", "my-header1", "x-amz-date"])?;
        let mut request = suite_request("GET", "/")
            .header("My-Header1", "value2")
            .header("My-Header1", "value2")
            .header("MY-HEADER1", "value1")
            .body(SigningBody::empty())?;
        stamp_request(&mut request, suite_time());

        let canonical = signer.canonical_request(&mut request)?;
        assert!(canonical.as_str().contains("\nmy-header1:value2,value2,value1\n"));

        signer.sign_request_at(&mut request, suite_time())?;

        assert_eq!(
            authorization(&request)?,
            expected(
                "host;my-header1;x-amz-date",
                "c9d5ea9f3f72853aea855b47ea873832890dbdd183b4468f858259531a5138ea"
            )
        );
        Ok(())
    }
}
