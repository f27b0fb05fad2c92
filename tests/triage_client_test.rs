mod common;

use budeba_backend::model::quote::QuoteStatus;
use budeba_backend::repository::quote_repo::QuoteRepository;
use budeba_backend::triage::{AdminApi, ClientError, HttpAdminClient, TriageBoard, SAVED_TOAST, SAVE_FAILED_TOAST};
use common::{setup_app, ADMIN_PASSWORD};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn quote_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "fullName": "Jane Doe",
        "phone": "0764111222",
        "email": null,
        "company": null,
        "location": null,
        "service": "Office Supplies & Stationery",
        "items": "10 boxes A4 paper",
        "budget": null,
        "deliveryDate": null,
        "status": status,
        "createdAt": "2026-03-01T09:30:00Z"
    })
}

#[tokio::test]
async fn test_fetch_quotes_decodes_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/quotes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            quote_json("65f0c0ffee0000000000abcd", "contacted"),
            quote_json("65f0c0ffee0000000000abce", "new"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpAdminClient::new(&server.uri()).unwrap();
    let quotes = client.fetch_quotes().await.unwrap();
    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0].status, QuoteStatus::Contacted);
    assert_eq!(quotes[1].delivery_date, None);
}

#[tokio::test]
async fn test_login_sends_password_and_keeps_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "password": "changeme123" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "budeba_admin=true; HttpOnly; SameSite=Lax; Path=/")
                .set_body_json(json!({ "ok": true })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/quotes"))
        .and(header("cookie", "budeba_admin=true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpAdminClient::new(&server.uri()).unwrap();
    client.login("changeme123").await.unwrap();
    assert!(client.fetch_quotes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rejected_login_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid password" })))
        .mount(&server)
        .await;

    let client = HttpAdminClient::new(&server.uri()).unwrap();
    match client.login("wrong").await {
        Err(ClientError::Status { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid password"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_board_applies_acknowledged_status() {
    let server = MockServer::start().await;
    let id = "65f0c0ffee0000000000abcd";
    Mock::given(method("GET"))
        .and(path("/admin/quotes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([quote_json(id, "new")])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/quote/status"))
        .and(body_json(json!({ "id": id, "status": "contacted" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "status": "contacted" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpAdminClient::new(&server.uri()).unwrap();
    let mut board = TriageBoard::load(&client).await.unwrap();
    assert!(board.change_status(&client, id, QuoteStatus::Contacted).await);
    assert_eq!(board.quotes()[0].status, QuoteStatus::Contacted);
    assert!(!board.is_saving(id));
    assert_eq!(board.toast().unwrap().message, SAVED_TOAST);
}

#[tokio::test]
async fn test_board_keeps_status_when_save_fails() {
    let server = MockServer::start().await;
    let id = "65f0c0ffee0000000000abcd";
    Mock::given(method("GET"))
        .and(path("/admin/quotes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([quote_json(id, "new")])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/quote/status"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "Failed to update status" })))
        .mount(&server)
        .await;

    let client = HttpAdminClient::new(&server.uri()).unwrap();
    let mut board = TriageBoard::load(&client).await.unwrap();
    assert!(!board.change_status(&client, id, QuoteStatus::Delivered).await);
    assert_eq!(board.quotes()[0].status, QuoteStatus::New);
    assert!(!board.is_saving(id));
    assert_eq!(board.toast().unwrap().message, SAVE_FAILED_TOAST);
}

#[tokio::test]
async fn test_client_against_running_server() {
    let app = setup_app();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let submit = reqwest::Client::new()
        .post(format!("http://{addr}/quote"))
        .json(&json!({ "fullName": "Jane Doe", "phone": "0764111222", "items": "10 boxes A4 paper" }))
        .send()
        .await
        .unwrap();
    assert_eq!(submit.status(), 200);

    let client = HttpAdminClient::new(&format!("http://{addr}")).unwrap();
    client.login(ADMIN_PASSWORD).await.unwrap();

    let mut board = TriageBoard::load(&client).await.unwrap();
    assert_eq!(board.summary().new, 1);
    let id = board.quotes()[0].id.clone();

    assert!(board.change_status(&client, &id, QuoteStatus::Delivered).await);
    assert_eq!(board.summary().delivered, 1);
    assert_eq!(app.repo.list_all().await.unwrap()[0].status, QuoteStatus::Delivered);
}
