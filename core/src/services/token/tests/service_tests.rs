//! Tests for the QR token service

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::errors::{DomainError, TokenError};
use crate::services::token::{QrTokenConfig, QrTokenService, SigningSecret};

const SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

fn service() -> QrTokenService {
    let secret = SigningSecret::new(SECRET).unwrap();
    QrTokenService::new(QrTokenConfig::new(secret)).unwrap()
}

#[test]
fn test_issue_then_verify_round_trip() {
    let service = service();
    let (org, location) = (Uuid::new_v4(), Uuid::new_v4());
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();

    let issued = service.issue_at(org, location, 3600, now).unwrap();
    assert_eq!(issued.expires_at, now + Duration::seconds(3600));

    let payload = service.verify_at(&issued.token, now).unwrap();
    assert_eq!(payload.organization_id, org);
    assert_eq!(payload.location_id, location);
    assert_eq!(payload.expires_at, payload.issued_at + 3600);
    assert_eq!(payload.nonce.len(), 32);
}

#[test]
fn test_payload_is_camel_case_json() {
    let service = service();
    let issued = service.issue(Uuid::new_v4(), Uuid::new_v4(), 60).unwrap();
    let (payload, _) = issued.token.split_once('.').unwrap();
    let json: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();

    for field in ["organizationId", "locationId", "issuedAt", "expiresAt", "nonce"] {
        assert!(json.get(field).is_some(), "missing {field}");
    }
}

#[test]
fn test_nonce_makes_tokens_unique() {
    let service = service();
    let (org, location) = (Uuid::new_v4(), Uuid::new_v4());
    let now = Utc::now();
    let a = service.issue_at(org, location, 60, now).unwrap();
    let b = service.issue_at(org, location, 60, now).unwrap();
    assert_ne!(a.token, b.token);
}

#[test]
fn test_every_flipped_signature_byte_is_invalid() {
    let service = service();
    let issued = service.issue(Uuid::new_v4(), Uuid::new_v4(), 3600).unwrap();
    let (payload, signature) = issued.token.split_once('.').unwrap();
    let signature = URL_SAFE_NO_PAD.decode(signature).unwrap();

    for i in 0..signature.len() {
        let mut tampered = signature.clone();
        tampered[i] ^= 0x01;
        let token = format!("{payload}.{}", URL_SAFE_NO_PAD.encode(&tampered));
        assert_eq!(service.verify(&token), Err(TokenError::Invalid), "byte {i}");
    }
}

#[test]
fn test_tampered_payload_is_invalid() {
    let service = service();
    let issued = service.issue(Uuid::new_v4(), Uuid::new_v4(), 3600).unwrap();
    let (payload, signature) = issued.token.split_once('.').unwrap();

    let mut json: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();
    json["locationId"] = serde_json::json!(Uuid::new_v4());
    let forged = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&json).unwrap());

    assert_eq!(
        service.verify(&format!("{forged}.{signature}")),
        Err(TokenError::Invalid)
    );
}

#[test]
fn test_expired_is_distinct_from_invalid() {
    let service = service();
    let issued_at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let issued = service
        .issue_at(Uuid::new_v4(), Uuid::new_v4(), 60, issued_at)
        .unwrap();

    // Still valid on the expiry second itself
    assert!(service
        .verify_at(&issued.token, issued_at + Duration::seconds(60))
        .is_ok());
    assert_eq!(
        service.verify_at(&issued.token, issued_at + Duration::seconds(61)),
        Err(TokenError::Expired)
    );
}

#[test]
fn test_malformed_input_never_panics() {
    let service = service();
    let oversized = "a".repeat(5000);
    let inputs = [
        "",
        ".",
        "abc",
        "abc.",
        ".abc",
        "a.b.c",
        "!!!.???",
        "eyJmb28iOiJiYXIifQ.c2ln",
        oversized.as_str(),
    ];
    for input in inputs {
        assert_eq!(service.verify(input), Err(TokenError::Invalid), "{input:?}");
    }
}

#[test]
fn test_token_from_another_secret_is_invalid() {
    let other = QrTokenService::new(QrTokenConfig::new(
        SigningSecret::new("another-secret-that-is-also-32-bytes-long").unwrap(),
    ))
    .unwrap();
    let issued = other.issue(Uuid::new_v4(), Uuid::new_v4(), 3600).unwrap();
    assert_eq!(service().verify(&issued.token), Err(TokenError::Invalid));
}

#[test]
fn test_non_positive_ttl_rejected() {
    let service = service();
    for ttl in [0, -1] {
        let result = service.issue(Uuid::new_v4(), Uuid::new_v4(), ttl);
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}

#[test]
fn test_short_secret_rejected_and_redacted() {
    assert!(SigningSecret::new("short").is_err());

    let secret = SigningSecret::new(SECRET).unwrap();
    let debug = format!("{:?}", QrTokenConfig::new(secret));
    assert!(!debug.contains(SECRET));
    assert!(debug.contains("redacted"));
}

#[test]
fn test_hash_is_stable_sha256_hex() {
    let service = service();
    let hash = service.hash("some.token");
    assert_eq!(hash.len(), 64);
    assert_eq!(hash, service.hash("some.token"));
    assert_ne!(hash, service.hash("other.token"));
    assert!(!hash.contains("some"));
}
