//! End-to-end signing scenarios.

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};
    use std::sync::Arc;
    use std::thread;

    use bytes::Bytes;
    use rustsign_sigv4::{SignError, SigningBody};

    use crate::{authorization, suite_request, suite_signer, suite_time};

    #[test]
    fn test_should_sign_iam_request_with_host_only() -> anyhow::Result<()> {
        let signer = suite_signer("iam", &["host"])?;
        let mut request = suite_request("GET", "/").body(SigningBody::empty())?;

        signer.sign_request_at(&mut request, suite_time())?;

        assert_eq!(
            authorization(&request)?,
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/iam/aws4_request, \
             SignedHeaders=host, \
             Signature=ab9486734ed39a3dd56be33be85187002e54a58fe38ff943ec43ab3a8706eaa4"
        );
        Ok(())
    }

    #[test]
    fn test_should_return_readable_body_after_signing() -> anyhow::Result<()> {
        let payload = b"Action=CreateUser&UserName=alice&Version=2010-05-08".to_vec();
        let signer = suite_signer("iam", &["host"])?;
        let mut request = suite_request("POST", "/")
            .body(SigningBody::from_reader(Cursor::new(payload.clone())))?;

        signer.sign_request_at(&mut request, suite_time())?;

        assert_eq!(
            request.body().as_bytes(),
            Some(&Bytes::from(payload.clone()))
        );
        let mut sent = Vec::new();
        request.body_mut().read_to_end(&mut sent)?;
        assert_eq!(sent, payload);
        Ok(())
    }

    #[test]
    fn test_should_sign_streamed_and_buffered_bodies_identically() -> anyhow::Result<()> {
        let signer = suite_signer("iam", &["host"])?;
        let mut streamed = suite_request("PUT", "/object")
            .body(SigningBody::from_reader(Cursor::new(b"same bytes".to_vec())))?;
        let mut buffered =
            suite_request("PUT", "/object").body(SigningBody::from(b"same bytes".to_vec()))?;

        signer.sign_request_at(&mut streamed, suite_time())?;
        signer.sign_request_at(&mut buffered, suite_time())?;

        assert_eq!(authorization(&streamed)?, authorization(&buffered)?);
        Ok(())
    }

    #[test]
    fn test_should_fail_without_authorization_when_signed_header_missing() -> anyhow::Result<()> {
        let signer = suite_signer("iam", &["host", "x-amz-date"])?;
        let mut request = suite_request("GET", "/").body(SigningBody::from("keep me"))?;

        let err = signer
            .sign_request_at(&mut request, suite_time())
            .expect_err("x-amz-date was never set");

        assert!(matches!(err, SignError::MissingHeader(ref name) if name == "x-amz-date"));
        assert!(request.headers().get(http::header::AUTHORIZATION).is_none());

        let mut body = Vec::new();
        request.body_mut().read_to_end(&mut body)?;
        assert_eq!(body, b"keep me");
        Ok(())
    }

    #[test]
    fn test_should_sign_concurrently_with_shared_signer() -> anyhow::Result<()> {
        let signer = Arc::new(suite_signer("iam", &["Host"])?);

        let handles = (0..8)
            .map(|_| {
                let signer = Arc::clone(&signer);
                thread::spawn(move || -> anyhow::Result<String> {
                    let mut request = suite_request("GET", "/?b=2&a=1").body(SigningBody::empty())?;
                    signer.sign_request_at(&mut request, suite_time())?;
                    authorization(&request)
                })
            })
            .collect::<Vec<_>>();

        let mut headers = Vec::with_capacity(handles.len());
        for handle in handles {
            let header = handle
                .join()
                .map_err(|_| anyhow::anyhow!("signing thread panicked"))??;
            headers.push(header);
        }

        assert!(headers.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(signer.config().signed_headers, vec!["Host"]);
        Ok(())
    }
}
