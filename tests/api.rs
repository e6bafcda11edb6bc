//! End-to-end tests against a local HTTP server.

use std::time::Duration;

use chapa::options::{RefundOptions, TransferOptions, VerifyOptions};
use chapa::{Chapa, ChapaError, ClientConfig};
use http::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "CHASECK_TEST-integration";

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(SECRET).with_base_url(format!("{}/v1", server.uri()))
}

fn transfer() -> TransferOptions {
    TransferOptions {
        account_name: "Abebe Kebede".to_string(),
        account_number: "1000123456789".to_string(),
        amount: "250".to_string(),
        currency: "ETB".to_string(),
        reference: "PAYOUT-1".to_string(),
        bank_code: 656,
    }
}

#[tokio::test]
async fn transfer_posts_json_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/transfers"))
        .and(header("authorization", format!("Bearer {SECRET}").as_str()))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "account_name": "Abebe Kebede",
            "account_number": "1000123456789",
            "amount": "250",
            "currency": "ETB",
            "reference": "PAYOUT-1",
            "bank_code": 656
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Transfer Queued Successfully",
            "status": "success",
            "data": "PAYOUT-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let chapa = Chapa::new(config(&server)).unwrap();
    let response = chapa.transfer(&transfer(), None).await.unwrap();

    assert_eq!(response.status_text(), Some("success"));
    assert_eq!(response.data, Some(json!("PAYOUT-1")));
}

#[tokio::test]
async fn refund_posts_a_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/refund/TX-77"))
        .and(body_string_contains("amount=50"))
        .and(body_string_contains("reason=customer+request"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Refund processed",
            "status": "success"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let chapa = Chapa::new(config(&server)).unwrap();
    let options = RefundOptions {
        tx_ref: "TX-77".to_string(),
        reason: Some("customer request".to_string()),
        amount: Some("50".to_string()),
        meta: None,
    };

    let response = chapa.refund(&options, None).await.unwrap();
    assert_eq!(response.message_text(), Some("Refund processed"));
}

#[tokio::test]
async fn direct_charge_sends_type_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .and(query_param("type", "telebirr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let chapa = Chapa::new(config(&server)).unwrap();
    let options = chapa::options::DirectChargeOptions {
        mobile: "0912345678".to_string(),
        currency: "ETB".to_string(),
        amount: "10".to_string(),
        tx_ref: "TX-DC-1".to_string(),
        payment_method: "telebirr".to_string(),
        ..Default::default()
    };

    chapa.direct_charge(&options, None).await.unwrap();
}

#[tokio::test]
async fn client_error_is_normalized_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/transaction/verify/TX-missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Invalid transaction or Transaction not found",
            "status": "failed",
            "data": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let chapa = Chapa::new(
        config(&server)
            .with_retries(3)
            .with_retry_delay(Duration::from_millis(5)),
    )
    .unwrap();
    let options = VerifyOptions {
        tx_ref: "TX-missing".to_string(),
    };

    let err = chapa.verify(&options, None).await.unwrap_err();
    assert!(matches!(err, ChapaError::Remote { .. }));
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.message(), "Invalid transaction or Transaction not found");
}

#[tokio::test]
async fn server_error_is_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/banks"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/banks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Banks retrieved",
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let chapa = Chapa::new(
        config(&server)
            .with_retries(2)
            .with_retry_delay(Duration::from_millis(5)),
    )
    .unwrap();

    let response = chapa.get_banks(None).await.unwrap();
    assert_eq!(response.data, Some(json!([])));
}

#[tokio::test]
async fn exhausted_retries_report_last_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/transfers"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "message": "Service unavailable"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let chapa = Chapa::new(
        config(&server)
            .with_retries(1)
            .with_retry_delay(Duration::from_millis(5)),
    )
    .unwrap();

    let err = chapa.get_transfers(None).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    assert_eq!(err.message(), "Service unavailable");
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/transactions"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let chapa = Chapa::new(config(&server).with_timeout(Duration::from_millis(100))).unwrap();

    let err = chapa.get_transactions(None).await.unwrap_err();
    assert!(matches!(err, ChapaError::Transport { .. }));
    assert_eq!(err.status(), Some(StatusCode::REQUEST_TIMEOUT));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let chapa = Chapa::new(
        ClientConfig::new(SECRET).with_base_url("http://127.0.0.1:9/v1"),
    )
    .unwrap();

    let err = chapa.get_banks(None).await.unwrap_err();
    assert!(matches!(err, ChapaError::Transport { .. }));
    assert!(err.status().is_some_and(|s| s.is_server_error()));
}

#[tokio::test]
async fn invalid_options_never_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let chapa = Chapa::new(config(&server)).unwrap();
    let options = TransferOptions {
        account_name: String::new(),
        ..transfer()
    };

    let err = chapa.transfer(&options, None).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(err.message(), "account_name is a required field");
}
