use super::*;

const SECRET: &[u8] = b"It's a Secret to Everybody";
const BODY: &[u8] = b"Hello, World!";

#[test]
fn test_sign_matches_github_documentation_example() {
    // Example published in GitHub's webhook validation guide.
    assert_eq!(
        sign(BODY, SECRET, SignatureAlgorithm::Sha256),
        "sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17"
    );
}

#[test]
fn test_verify_delivery_sha256() {
    let header = sign(BODY, SECRET, SignatureAlgorithm::Sha256);

    assert_eq!(
        verify_delivery(BODY, Some(&header), None, SECRET),
        Ok(SignatureAlgorithm::Sha256)
    );
}

#[test]
fn test_verify_delivery_legacy_sha1() {
    let header = sign(BODY, SECRET, SignatureAlgorithm::Sha1);
    assert!(header.starts_with("sha1="));

    assert_eq!(
        verify_delivery(BODY, None, Some(&header), SECRET),
        Ok(SignatureAlgorithm::Sha1)
    );
}

#[test]
fn test_verify_delivery_prefers_sha256() {
    let good_sha256 = sign(BODY, SECRET, SignatureAlgorithm::Sha256);
    let bad_sha1 = sign(BODY, b"other", SignatureAlgorithm::Sha1);

    assert_eq!(
        verify_delivery(BODY, Some(&good_sha256), Some(&bad_sha1), SECRET),
        Ok(SignatureAlgorithm::Sha256)
    );
}

#[test]
fn test_verify_delivery_missing() {
    assert_eq!(
        verify_delivery(BODY, None, None, SECRET),
        Err(SignatureError::Missing)
    );
}

#[test]
fn test_verify_delivery_wrong_secret() {
    let header = sign(BODY, b"wrong secret", SignatureAlgorithm::Sha256);

    assert_eq!(
        verify_delivery(BODY, Some(&header), None, SECRET),
        Err(SignatureError::Mismatch)
    );
}

#[test]
fn test_verify_delivery_tampered_body() {
    let header = sign(BODY, SECRET, SignatureAlgorithm::Sha256);

    assert_eq!(
        verify_delivery(b"Hello, World?", Some(&header), None, SECRET),
        Err(SignatureError::Mismatch)
    );
}

#[test]
fn test_verify_signature_malformed_headers() {
    for header in ["", "sha256", "sha256=zz", "md5=abcd"] {
        assert!(
            matches!(
                verify_signature(BODY, header, SignatureAlgorithm::Sha256, SECRET),
                Err(SignatureError::Malformed(_))
            ),
            "expected malformed for {header:?}"
        );
    }
}

#[test]
fn test_verify_signature_truncated_digest_is_mismatch() {
    let header = sign(BODY, SECRET, SignatureAlgorithm::Sha256);
    let truncated = &header[..header.len() - 2];

    assert_eq!(
        verify_signature(BODY, truncated, SignatureAlgorithm::Sha256, SECRET),
        Err(SignatureError::Mismatch)
    );
}
