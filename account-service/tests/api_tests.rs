mod common;

use account_service::domain::user::models::PageDefaults;
use account_service::domain::user::models::Username;
use account_service::domain::user::ports::UserRepository;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use common::TestAppOptions;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_root_reports_version() {
    let app = TestApp::spawn().await;

    let response = app.get("/").send().await.expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert_eq!(body, format!("account-service v{}", env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::spawn().await;

    let response = app.signup("alice", "Alice Liddell", "secret123").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["fullname"], "Alice Liddell");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_username_keeps_existing_account() {
    let app = TestApp::spawn().await;

    app.signup("alice", "Alice Liddell", "secret123").await;
    let response = app.signup("alice", "Other Alice", "different1").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));

    // The original password still works, the second one does not.
    assert_eq!(app.login("alice", "secret123").await.status(), StatusCode::OK);
    assert_eq!(
        app.login("alice", "different1").await.status(),
        StatusCode::UNAUTHORIZED
    );

    let username = Username::new("alice".to_string()).unwrap();
    let stored = app
        .repository
        .find_by_username(&username)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.fullname.as_str(), "Alice Liddell");
}

#[tokio::test]
async fn test_signup_validation_errors() {
    let app = TestApp::spawn().await;

    for (username, fullname, password) in [
        ("a", "Alice Liddell", "secret123"),
        ("alice", "", "secret123"),
        ("alice", "Alice Liddell", "abcd"),
        ("alice", "   ", "secret123"),
    ] {
        let response = app.signup(username, fullname, password).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["success"], false);
        assert!(body["data"]["message"].is_string());
    }
}

#[tokio::test]
async fn test_signup_accepts_free_form_usernames() {
    let app = TestApp::spawn().await;

    for username in ["alice@example.com", "Alice Liddell", "al"] {
        let response = app.signup(username, "Alice Liddell", "secret123").await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["data"]["username"], username);
        assert_eq!(app.login(username, "secret123").await.status(), StatusCode::OK);
    }

    let long_password = "p".repeat(300);
    let response = app.signup("carol", "Carol Example", &long_password).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        app.login("carol", &long_password).await.status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_signup_malformed_json_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/signup")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_login_returns_token_for_subject() {
    let app = TestApp::spawn().await;
    app.signup("alice", "Alice Liddell", "secret123").await;

    let response = app.login("alice", "secret123").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["data"]["token"].as_str().unwrap();
    assert!(!token.is_empty());

    let claims = app.authenticator.verify_token(token).unwrap();
    assert_eq!(app.authenticator.extract_subject(&claims).unwrap(), "alice");
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_user_look_the_same() {
    let app = TestApp::spawn().await;
    app.signup("alice", "Alice Liddell", "secret123").await;

    let wrong_password = app.login("alice", "wrongpass").await;
    let unknown_user = app.login("mallory", "secret123").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_user: serde_json::Value = unknown_user.json().await.unwrap();
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password["data"]["message"], "invalid credentials");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/login")
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_users_with_valid_token() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice", "secret123").await;

    let response = app
        .get_authenticated("/user/list", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["current_page"], 1);
    assert_eq!(body["data"]["items"][0]["username"], "alice");
    assert!(body["data"]["items"][0].get("password_hash").is_none());
}

#[tokio::test]
async fn test_list_users_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/user/list")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "authorization required");
}

#[tokio::test]
async fn test_list_users_with_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/user/list", "garbage")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "invalid token");
}

#[tokio::test]
async fn test_list_users_with_expired_token() {
    let app = TestApp::spawn().await;
    app.signup("alice", "Alice Liddell", "secret123").await;

    let expired = app
        .authenticator
        .token_codec()
        .issue_at("alice", Utc::now() - Duration::hours(24) - Duration::seconds(1))
        .unwrap();

    let response = app
        .get_authenticated("/user/list", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "invalid token");
}

#[tokio::test]
async fn test_list_users_with_query_token() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice", "secret123").await;

    let response = app
        .get("/user/list")
        .query(&[("authorization", format!("Bearer {}", token))])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_query_token_ignored_when_fallback_disabled() {
    let app = TestApp::spawn_with(TestAppOptions {
        query_token_fallback: false,
        ..TestAppOptions::default()
    })
    .await;
    let token = app.token_for("alice", "secret123").await;

    let response = app
        .get("/user/list")
        .query(&[("authorization", format!("Bearer {}", token))])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_users_pagination() {
    let app = TestApp::spawn_with(TestAppOptions {
        page_defaults: PageDefaults {
            default_limit: 2,
            max_limit: 3,
        },
        ..TestAppOptions::default()
    })
    .await;

    for name in ["alice", "bob", "carol", "dave", "erin"] {
        app.signup(name, &format!("{} Example", name), "secret123")
            .await;
    }
    let token = app.token_for("frank", "secret123").await;

    // Default limit applies when none is given.
    let body: serde_json::Value = app
        .get_authenticated("/user/list?page=2", &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["current_page"], 2);
    assert_eq!(body["data"]["limit"], 2);
    assert_eq!(body["data"]["total"], 6);
    assert_eq!(body["data"]["previous_page"], 1);
    assert_eq!(body["data"]["next_page"], 3);
    assert_eq!(body["data"]["items"][0]["username"], "carol");
    assert_eq!(body["data"]["items"][1]["username"], "dave");

    // Oversized limits are clamped; the last page has no next page.
    let body: serde_json::Value = app
        .get_authenticated("/user/list?page=2&limit=50", &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["limit"], 3);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 3);
    assert!(body["data"]["next_page"].is_null());

    // Pages below 1 fall back to the first page.
    let body: serde_json::Value = app
        .get_authenticated("/user/list?page=0", &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["current_page"], 1);
    assert!(body["data"]["previous_page"].is_null());
}

#[tokio::test]
async fn test_list_users_non_numeric_paging_uses_defaults() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice", "secret123").await;

    for query in ["page=abc", "limit=lots", "page=abc&limit=-", "page=&limit="] {
        let response = app
            .get_authenticated(&format!("/user/list?{}", query), &token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["data"]["current_page"], 1);
        assert_eq!(
            body["data"]["limit"],
            PageDefaults::default().default_limit
        );
        assert_eq!(body["data"]["items"][0]["username"], "alice");
    }
}

#[tokio::test]
async fn test_soft_deleted_user_cannot_log_in() {
    let app = TestApp::spawn().await;
    app.signup("alice", "Alice Liddell", "secret123").await;

    let username = Username::new("alice".to_string()).unwrap();
    assert!(app.repository.soft_delete(&username).await);

    let response = app.login("alice", "secret123").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
