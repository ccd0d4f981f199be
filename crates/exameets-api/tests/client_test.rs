#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use exameets_api::{ApiClient, Error, ListQuery, LoginCredentials, routes};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── List / pagination ───────────────────────────────────────────────

#[tokio::test]
async fn test_list_jobs_with_pagination() {
    let (server, client) = setup().await;

    let payload = json!({
        "success": true,
        "jobs": [
            { "_id": "j1", "title": "Backend Engineer", "companyName": "Acme" },
            { "_id": "j2", "title": "Data Analyst", "companyName": "Initech" }
        ],
        "currentPage": 2,
        "totalPages": 3,
        "totalItems": 25
    });

    Mock::given(method("GET"))
        .and(path("/api/v1/job/getall"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&server)
        .await;

    let page = client.list(&routes::JOB, &ListQuery::page(2)).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].id, "j1");
    assert_eq!(page.items[0].str_field("title"), Some("Backend Engineer"));
    assert_eq!(page.pagination.current_page, 2);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.pagination.total_items, 25);
}

#[tokio::test]
async fn test_list_sends_search_keyword() {
    let (server, client) = setup().await;

    let payload = json!({
        "success": true,
        "exams": [{ "_id": "e1", "name": "GATE 2026" }],
        "currentPage": 1,
        "totalPages": 1,
        "totalItems": 1
    });

    Mock::given(method("GET"))
        .and(path("/api/v1/exam/getall"))
        .and(query_param("searchKeyword", "gate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&server)
        .await;

    let page = client
        .list(&routes::EXAM, &ListQuery::search("gate"))
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].str_field("name"), Some("GATE 2026"));
}

#[tokio::test]
async fn test_list_passes_entity_filters() {
    let (server, client) = setup().await;

    let payload = json!({ "success": true, "govtjobs": [], "totalPages": 1 });

    Mock::given(method("GET"))
        .and(path("/api/v1/govtjob/getall"))
        .and(query_param("location", "Hyderabad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&server)
        .await;

    let page = client
        .list(
            &routes::GOVT_JOB,
            &ListQuery::default().with_filter("location", "Hyderabad"),
        )
        .await
        .unwrap();

    assert!(page.items.is_empty());
}

// ── Detail / mutation ───────────────────────────────────────────────

#[tokio::test]
async fn test_get_one() {
    let (server, client) = setup().await;

    let payload = json!({
        "success": true,
        "scholarship": { "_id": "s1", "title": "Merit Scholarship", "amount": "50000" }
    });

    Mock::given(method("GET"))
        .and(path("/api/v1/scholarship/get/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&server)
        .await;

    let record = client.get_one(&routes::SCHOLARSHIP, "s1").await.unwrap();

    assert_eq!(record.id, "s1");
    assert_eq!(record.str_field("amount"), Some("50000"));
}

#[tokio::test]
async fn test_create_returns_record_and_message() {
    let (server, client) = setup().await;

    let payload = json!({
        "success": true,
        "message": "Job created successfully",
        "job": { "_id": "new1", "title": "SRE" }
    });

    Mock::given(method("POST"))
        .and(path("/api/v1/job/create"))
        .respond_with(ResponseTemplate::new(201).set_body_json(&payload))
        .mount(&server)
        .await;

    let body = json!({ "title": "SRE" }).as_object().cloned().unwrap();
    let outcome = client.create(&routes::JOB, body).await.unwrap();

    assert_eq!(outcome.record.unwrap().id, "new1");
    assert_eq!(outcome.message.as_deref(), Some("Job created successfully"));
}

#[tokio::test]
async fn test_delete_returns_message() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/admitcard/ac1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Admit card deleted"
        })))
        .mount(&server)
        .await;

    let message = client.delete_one(&routes::ADMIT_CARD, "ac1").await.unwrap();
    assert_eq!(message.as_deref(), Some("Admit card deleted"));
}

#[tokio::test]
async fn test_latest() {
    let (server, client) = setup().await;

    let payload = json!({
        "success": true,
        "pyqs": [
            { "_id": "p1", "title": "JEE 2024 Paper" },
            { "_id": "p2", "title": "NEET 2024 Paper" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/v1/pyq/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&server)
        .await;

    let latest = client.latest(&routes::PREVIOUS_YEAR_PAPER).await.unwrap();
    assert_eq!(latest.len(), 2);
}

// ── Error handling ──────────────────────────────────────────────────

#[tokio::test]
async fn test_backend_error_message_is_surfaced_verbatim() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/job/get/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "message": "Job not found"
        })))
        .mount(&server)
        .await;

    let result = client.get_one(&routes::JOB, "missing").await;

    match result {
        Err(Error::Api {
            ref message,
            status,
        }) => {
            assert_eq!(message, "Job not found");
            assert_eq!(status, 404);
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_message_gets_generic_fallback() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/job/getall"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.list(&routes::JOB, &ListQuery::default()).await;

    match result {
        Err(Error::Api { ref message, .. }) => {
            assert!(
                message.contains("HTTP 500"),
                "expected generic HTTP message, got: {message}"
            );
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_success_false_with_http_200_is_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/admission/getall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Something went wrong"
        })))
        .mount(&server)
        .await;

    let result = client.list(&routes::ADMISSION, &ListQuery::default()).await;

    match result {
        Err(Error::Api { ref message, .. }) => assert_eq!(message, "Something went wrong"),
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/getuser"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Please login to access this resource"
        })))
        .mount(&server)
        .await;

    let result = client.current_user().await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(message.contains("login"), "unexpected message: {message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

// ── Session ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    let payload = json!({
        "success": true,
        "message": "Logged in successfully",
        "user": { "_id": "u1", "name": "Asha", "email": "asha@example.com" }
    });

    Mock::given(method("POST"))
        .and(path("/api/v1/user/login"))
        .and(body_json(
            json!({"email": "asha@example.com", "password": "hunter2"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&server)
        .await;

    let creds = LoginCredentials {
        email: "asha@example.com".into(),
        password: SecretString::from("hunter2".to_owned()),
    };
    let (user, message) = client.login(&creds).await.unwrap();

    assert_eq!(user.id, "u1");
    assert_eq!(user.str_field("name"), Some("Asha"));
    assert_eq!(message.as_deref(), Some("Logged in successfully"));
}

#[tokio::test]
async fn test_login_failure_carries_backend_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/user/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Invalid email or password"
        })))
        .mount(&server)
        .await;

    let creds = LoginCredentials {
        email: "asha@example.com".into(),
        password: SecretString::from("wrong".to_owned()),
    };
    let result = client.login(&creds).await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert_eq!(message, "Invalid email or password");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_current_user_empty_payload_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/getuser"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": null
        })))
        .mount(&server)
        .await;

    let user = client.current_user().await.unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn test_update_profile_returns_merge_subset() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/user/update/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Profile updated",
            "user": { "_id": "u1", "name": "Asha Rao" }
        })))
        .mount(&server)
        .await;

    let body = json!({ "name": "Asha Rao" }).as_object().cloned().unwrap();
    let outcome = client.update_profile(body).await.unwrap();

    let patch = outcome.record.unwrap();
    assert_eq!(patch.str_field("name"), Some("Asha Rao"));
    // The patch is a subset, not the full record.
    assert!(patch.str_field("email").is_none());
}
