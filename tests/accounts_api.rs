//! End-to-end tests driving the axum router with an in-memory ledger and
//! mockito stand-ins for the user and transaction services.

use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bigdecimal::BigDecimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use account_core::adapters::MemoryLedgerStore;
use account_core::clients::{HttpAccountDirectory, HttpTransactionRecorder};
use account_core::domain::Account;
use account_core::ports::LedgerStore;
use account_core::services::AccountService;
use account_core::{AppState, create_app};

struct TestApp {
    app: Router,
    ledger: Arc<MemoryLedgerStore>,
}

fn test_app(directory_url: String, recorder_url: String) -> TestApp {
    let ledger = Arc::new(MemoryLedgerStore::new());
    let store: Arc<dyn LedgerStore> = ledger.clone();
    let service = Arc::new(AccountService::new(
        store.clone(),
        Arc::new(HttpTransactionRecorder::new(recorder_url)),
        Arc::new(HttpAccountDirectory::new(directory_url)),
    ));

    TestApp {
        app: create_app(AppState {
            service,
            ledger: store,
        }),
        ledger,
    }
}

async fn seed(ledger: &MemoryLedgerStore, number: &str, user_id: i64, balance: i64) {
    let mut account = Account::open(number.to_string(), user_id);
    account.balance = BigDecimal::from(balance);
    ledger.put(account).await.expect("seed account");
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body())
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body())
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

fn as_decimal(value: &Value) -> BigDecimal {
    let text = value.as_str().expect("decimal encoded as string");
    BigDecimal::from_str(text).expect("parseable decimal")
}

#[tokio::test]
async fn create_account_resolves_number_through_directory() {
    let mut directory = mockito::Server::new_async().await;
    let recorder = mockito::Server::new_async().await;
    let mock = directory
        .mock("GET", "/accountNumber/42")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"userId":42,"accountNumber":"100000000001"}"#)
        .create_async()
        .await;

    let t = test_app(directory.url(), recorder.url());
    let (status, body) = post_json(&t.app, "/accounts/create", json!({"userId": 42})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accountNumber"], "100000000001");
    assert_eq!(body["userId"], 42);
    assert_eq!(as_decimal(&body["balance"]), BigDecimal::from(0));
    mock.assert_async().await;
}

#[tokio::test]
async fn create_account_fails_when_directory_has_no_number() {
    let mut directory = mockito::Server::new_async().await;
    let recorder = mockito::Server::new_async().await;
    let _mock = directory
        .mock("GET", "/accountNumber/42")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"userId":42}"#)
        .create_async()
        .await;

    let t = test_app(directory.url(), recorder.url());
    let (status, body) = post_json(&t.app, "/accounts/create", json!({"userId": 42})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().expect("error message").contains("42"));
}

#[tokio::test]
async fn crediting_twice_accumulates_and_records_two_legs() {
    let directory = mockito::Server::new_async().await;
    let mut recorder = mockito::Server::new_async().await;
    let mock = recorder
        .mock("POST", "/add")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"accountNumber":"100000000001","type":"credit"}"#.to_string(),
        ))
        .with_status(200)
        .expect(2)
        .create_async()
        .await;

    let t = test_app(directory.url(), recorder.url());
    seed(&t.ledger, "100000000001", 42, 0).await;

    let body = json!({"accountNumber": "100000000001", "amount": 50.0});
    let (status, first) = post_json(&t.app, "/accounts/add", body.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_decimal(&first["balance"]), BigDecimal::from(50));

    let (status, second) = post_json(&t.app, "/accounts/add", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_decimal(&second["balance"]), BigDecimal::from(100));

    mock.assert_async().await;
}

#[tokio::test]
async fn credit_is_accepted_even_when_recorder_is_down() {
    let directory = mockito::Server::new_async().await;
    let mut recorder = mockito::Server::new_async().await;
    let _mock = recorder
        .mock("POST", "/add")
        .with_status(500)
        .create_async()
        .await;

    let t = test_app(directory.url(), recorder.url());
    seed(&t.ledger, "100000000001", 42, 0).await;

    let (status, body) = post_json(
        &t.app,
        "/accounts/add",
        json!({"accountNumber": "100000000001", "amount": 50.0}),
    )
    .await;

    // Ledger wins over log: the committed balance change is not unwound.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_decimal(&body["balance"]), BigDecimal::from(50));
}

#[tokio::test]
async fn credit_rejects_malformed_account_number() {
    let directory = mockito::Server::new_async().await;
    let recorder = mockito::Server::new_async().await;
    let t = test_app(directory.url(), recorder.url());

    let (status, body) = post_json(
        &t.app,
        "/accounts/add",
        json!({"accountNumber": "12345", "amount": 50.0}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error message").contains("12345"));
}

#[tokio::test]
async fn credit_rejects_unknown_account() {
    let directory = mockito::Server::new_async().await;
    let recorder = mockito::Server::new_async().await;
    let t = test_app(directory.url(), recorder.url());

    let (status, _body) = post_json(
        &t.app,
        "/accounts/add",
        json!({"accountNumber": "100000000001", "amount": 50.0}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn credit_rejects_non_positive_amount() {
    let directory = mockito::Server::new_async().await;
    let recorder = mockito::Server::new_async().await;
    let t = test_app(directory.url(), recorder.url());
    seed(&t.ledger, "100000000001", 42, 70).await;

    let (status, _body) = post_json(
        &t.app,
        "/accounts/add",
        json!({"accountNumber": "100000000001", "amount": -5.0}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, balance) = get_json(&t.app, "/accounts/balance/100000000001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_decimal(&balance), BigDecimal::from(70));
}

#[tokio::test]
async fn transfer_moves_money_and_records_debit_and_credit() {
    let directory = mockito::Server::new_async().await;
    let mut recorder = mockito::Server::new_async().await;
    let debit_mock = recorder
        .mock("POST", "/add")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"accountNumber":"100000000001","type":"debit"}"#.to_string(),
        ))
        .with_status(200)
        .create_async()
        .await;
    let credit_mock = recorder
        .mock("POST", "/add")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"accountNumber":"200000000002","type":"credit"}"#.to_string(),
        ))
        .with_status(200)
        .create_async()
        .await;

    let t = test_app(directory.url(), recorder.url());
    seed(&t.ledger, "100000000001", 42, 100).await;
    seed(&t.ledger, "200000000002", 43, 0).await;

    let (status, sender) = post_json(
        &t.app,
        "/accounts/send",
        json!({
            "senderAccountNumber": "100000000001",
            "receiverAccountNumber": "200000000002",
            "amount": 30.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_decimal(&sender["balance"]), BigDecimal::from(70));

    let (_, receiver_balance) = get_json(&t.app, "/accounts/balance/200000000002").await;
    assert_eq!(as_decimal(&receiver_balance), BigDecimal::from(30));

    debit_mock.assert_async().await;
    credit_mock.assert_async().await;
}

#[tokio::test]
async fn transfer_with_insufficient_funds_changes_nothing() {
    let directory = mockito::Server::new_async().await;
    let mut recorder = mockito::Server::new_async().await;
    let mock = recorder
        .mock("POST", "/add")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let t = test_app(directory.url(), recorder.url());
    seed(&t.ledger, "100000000001", 42, 70).await;
    seed(&t.ledger, "200000000002", 43, 0).await;

    let (status, body) = post_json(
        &t.app,
        "/accounts/send",
        json!({
            "senderAccountNumber": "100000000001",
            "receiverAccountNumber": "200000000002",
            "amount": 1000.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .expect("error message")
            .contains("100000000001")
    );

    let (_, sender_balance) = get_json(&t.app, "/accounts/balance/100000000001").await;
    assert_eq!(as_decimal(&sender_balance), BigDecimal::from(70));
    let (_, receiver_balance) = get_json(&t.app, "/accounts/balance/200000000002").await;
    assert_eq!(as_decimal(&receiver_balance), BigDecimal::from(0));

    mock.assert_async().await;
}

#[tokio::test]
async fn transfer_reports_missing_sender() {
    let directory = mockito::Server::new_async().await;
    let recorder = mockito::Server::new_async().await;
    let t = test_app(directory.url(), recorder.url());

    let (status, body) = post_json(
        &t.app,
        "/accounts/send",
        json!({
            "senderAccountNumber": "100000000001",
            "receiverAccountNumber": "200000000002",
            "amount": 30.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(
        body["error"]
            .as_str()
            .expect("error message")
            .contains("sender account 100000000001")
    );
}

#[tokio::test]
async fn view_balance_returns_stored_amount() {
    let directory = mockito::Server::new_async().await;
    let recorder = mockito::Server::new_async().await;
    let t = test_app(directory.url(), recorder.url());
    seed(&t.ledger, "100000000001", 42, 70).await;

    let (status, balance) = get_json(&t.app, "/accounts/balance/100000000001").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_decimal(&balance), BigDecimal::from(70));
}

#[tokio::test]
async fn view_balance_rejects_malformed_number() {
    let directory = mockito::Server::new_async().await;
    let recorder = mockito::Server::new_async().await;
    let t = test_app(directory.url(), recorder.url());

    let (status, _body) = get_json(&t.app, "/accounts/balance/12ab").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn view_balance_on_unknown_account_is_not_found() {
    let directory = mockito::Server::new_async().await;
    let recorder = mockito::Server::new_async().await;
    let t = test_app(directory.url(), recorder.url());

    let (status, _body) = get_json(&t.app, "/accounts/balance/100000000001").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_ledger_connectivity() {
    let directory = mockito::Server::new_async().await;
    let recorder = mockito::Server::new_async().await;
    let t = test_app(directory.url(), recorder.url());

    let (status, body) = get_json(&t.app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["ledger"], "connected");
}
