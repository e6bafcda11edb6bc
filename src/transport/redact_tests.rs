//! Tests for diagnostic redaction.

use serde_json::json;

use super::redact::{
    REDACTED, SENSITIVE_KEYS, is_sensitive_key, redact_body, redact_form, redact_headers,
    redact_json,
};

mod sensitive_keys {
    use super::*;

    #[test]
    fn matches_case_insensitively() {
        assert!(is_sensitive_key("Authorization"));
        assert!(is_sensitive_key("SECRET_KEY"));
        assert!(is_sensitive_key("Api_Key"));
        assert!(is_sensitive_key("refresh_token"));
    }

    #[test]
    fn ignores_ordinary_keys() {
        assert!(!is_sensitive_key("tx_ref"));
        assert!(!is_sensitive_key("amount"));
        assert!(!is_sensitive_key("tokens_used"));
    }

    #[test]
    fn every_listed_key_is_sensitive() {
        for key in SENSITIVE_KEYS {
            assert!(is_sensitive_key(key), "{key} should be sensitive");
            assert!(is_sensitive_key(&key.to_uppercase()));
        }
    }
}

mod json_bodies {
    use super::*;

    #[test]
    fn redacts_top_level_keys() {
        let body = json!({"tx_ref": "TX-1", "Secret_Key": "sk_live_abc"});

        assert_eq!(
            redact_json(&body),
            json!({"tx_ref": "TX-1", "Secret_Key": REDACTED})
        );
    }

    #[test]
    fn redacts_nested_objects_and_arrays() {
        let body = json!({
            "meta": {"customer": {"password": "hunter2", "name": "Abebe"}},
            "items": [{"token": "t-1"}, {"api_key": "k-2", "id": 3}],
        });

        let redacted = redact_json(&body);

        assert_eq!(redacted["meta"]["customer"]["password"], REDACTED);
        assert_eq!(redacted["meta"]["customer"]["name"], "Abebe");
        assert_eq!(redacted["items"][0]["token"], REDACTED);
        assert_eq!(redacted["items"][1]["api_key"], REDACTED);
        assert_eq!(redacted["items"][1]["id"], 3);
    }

    #[test]
    fn sensitive_key_with_object_value_is_replaced_whole() {
        let body = json!({"secret": {"inner": "value"}});

        assert_eq!(redact_json(&body), json!({"secret": REDACTED}));
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(redact_json(&json!("token")), json!("token"));
        assert_eq!(redact_json(&json!(42)), json!(42));
        assert_eq!(redact_json(&json!(null)), json!(null));
    }

    #[test]
    fn original_value_never_appears_in_output() {
        let body = json!({"a": [{"b": {"ACCESS_TOKEN": "leak-me"}}], "client_secret": "leak-me"});

        assert!(!redact_json(&body).to_string().contains("leak-me"));
    }
}

mod form_bodies {
    use super::*;

    #[test]
    fn redacts_sensitive_fields() {
        let redacted = redact_form("reason=duplicate&token=abc123&amount=100");

        assert_eq!(redacted, "reason=duplicate&token=%5BREDACTED%5D&amount=100");
    }

    #[test]
    fn redacts_inside_json_valued_fields() {
        let meta = json!({"customer_id": "42", "password": "hunter2"}).to_string();
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("meta", &meta)
            .finish();

        let redacted = redact_form(&body);
        let decoded: Vec<(String, String)> = url::form_urlencoded::parse(redacted.as_bytes())
            .into_owned()
            .collect();

        assert!(!redacted.contains("hunter2"));
        assert_eq!(decoded[0].0, "meta");
        let meta: serde_json::Value = serde_json::from_str(&decoded[0].1).unwrap();
        assert_eq!(meta["password"], REDACTED);
        assert_eq!(meta["customer_id"], "42");
    }

    #[test]
    fn plain_values_are_preserved() {
        assert_eq!(redact_form("reason=Customer+request"), "reason=Customer+request");
    }

    #[test]
    fn empty_form_stays_empty() {
        assert_eq!(redact_form(""), "");
    }
}

mod headers {
    use super::*;

    #[test]
    fn redacts_authorization_header() {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            http::HeaderValue::from_static("Bearer sk_test_123"),
        );
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );

        let redacted = redact_headers(&headers);

        assert_eq!(redacted["authorization"], REDACTED);
        assert_eq!(redacted["content-type"], "application/json");
    }
}

mod raw_bodies {
    use super::*;

    #[test]
    fn json_body_is_redacted() {
        let body = br#"{"secret":"s","amount":"10"}"#;

        assert_eq!(
            redact_body(Some("application/json"), body),
            r#"{"secret":"[REDACTED]","amount":"10"}"#
        );
    }

    #[test]
    fn form_body_is_redacted() {
        let body = b"password=p&reason=r";

        assert_eq!(
            redact_body(Some("application/x-www-form-urlencoded"), body),
            "password=%5BREDACTED%5D&reason=r"
        );
    }

    #[test]
    fn unknown_body_is_summarized_by_length() {
        assert_eq!(redact_body(Some("text/html"), b"<html></html>"), "<13 bytes>");
    }

    #[test]
    fn empty_body_renders_empty() {
        assert_eq!(redact_body(None, b""), "");
    }
}
