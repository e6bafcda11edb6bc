//! Tests for webhook signatures.

use serde_json::json;

use super::{WebhookPayload, constant_time_eq, sign_payload, verify_signature};

const SECRET: &str = "whsec_test";

fn payload() -> WebhookPayload {
    WebhookPayload::from(r#"{"event":"charge.success","tx_ref":"TX-1"}"#)
}

mod signing {
    use super::*;

    #[test]
    fn signature_is_lowercase_hex_sha256() {
        let signature = sign_payload(&payload(), SECRET);

        assert_eq!(signature.len(), 64);
        assert!(
            signature
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn matches_known_vector() {
        // RFC 4231 test case 2
        let signature = sign_payload(
            &WebhookPayload::from("what do ya want for nothing?"),
            "Jefe",
        );

        assert_eq!(
            signature,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn json_payload_signs_its_compact_serialization() {
        let value = json!({"event": "charge.success", "tx_ref": "TX-1"});
        let raw = WebhookPayload::from(value.to_string());

        assert_eq!(
            sign_payload(&WebhookPayload::from(value), SECRET),
            sign_payload(&raw, SECRET)
        );
    }

    #[test]
    fn json_keys_keep_insertion_order() {
        let value = json!({"z": 1, "a": 2});

        assert_eq!(WebhookPayload::Json(value).canonical(), r#"{"z":1,"a":2}"#);
    }
}

mod key_lengths {
    use super::*;

    #[test]
    fn any_secret_length_signs() {
        for secret in [String::new(), "k".to_string(), "s".repeat(200)] {
            let signature = sign_payload(&payload(), &secret);

            assert_eq!(signature.len(), 64);
            assert!(verify_signature(&payload(), &signature, &secret));
        }
    }
}

mod verification {
    use super::*;

    #[test]
    fn round_trip_verifies() {
        let signature = sign_payload(&payload(), SECRET);

        assert!(verify_signature(&payload(), &signature, SECRET));
    }

    #[test]
    fn tampered_payload_fails() {
        let signature = sign_payload(&payload(), SECRET);
        let tampered = WebhookPayload::from(r#"{"event":"charge.success","tx_ref":"TX-2"}"#);

        assert!(!verify_signature(&tampered, &signature, SECRET));
    }

    #[test]
    fn single_character_change_fails() {
        let signature = sign_payload(&payload(), SECRET);
        let mut chars: Vec<char> = signature.chars().collect();
        chars[10] = if chars[10] == '0' { '1' } else { '0' };
        let mutated: String = chars.into_iter().collect();

        assert!(!verify_signature(&payload(), &mutated, SECRET));
    }

    #[test]
    fn wrong_secret_fails() {
        let signature = sign_payload(&payload(), "other-secret");

        assert!(!verify_signature(&payload(), &signature, SECRET));
    }

    #[test]
    fn uppercase_hex_is_rejected() {
        let signature = sign_payload(&payload(), SECRET).to_uppercase();

        assert!(!verify_signature(&payload(), &signature, SECRET));
    }

    #[test]
    fn malformed_signatures_are_rejected() {
        let valid = sign_payload(&payload(), SECRET);
        let longer = format!("{valid}0");

        for signature in ["", "abc", "zz", &valid[..63], longer.as_str()] {
            assert!(
                !verify_signature(&payload(), signature, SECRET),
                "{signature:?} should be rejected"
            );
        }
    }
}

mod comparison {
    use super::*;

    #[test]
    fn equal_inputs_match() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn length_mismatch_never_matches() {
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(!constant_time_eq(b"abcd", b"abc"));
        assert!(!constant_time_eq(b"", b"a"));
    }

    #[test]
    fn trailing_zero_bytes_do_not_match() {
        assert!(!constant_time_eq(b"ab", b"ab\0"));
    }

    #[test]
    fn differing_content_does_not_match() {
        assert!(!constant_time_eq(b"abc", b"abd"));
    }
}
