mod common;

use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_test::TestServer;
use serde_json::{Value, json};

use common::{
    REJECTED_CODE, STUB_AUTHORIZE_URL, test_server, test_server_without_login, viewer_profile,
};
use iptv_catalog::models::ProviderProfile;

/// Run the login redirect and callback, returning the session cookie
async fn log_in(server: &TestServer) -> Cookie<'static> {
    let login = server.get("/api/auth/login").await;
    login.assert_status(StatusCode::SEE_OTHER);
    let state_cookie = login.cookie("oauth_state");
    let state = state_cookie.value().to_string();

    let callback = server
        .get("/api/auth/callback")
        .add_query_param("code", "valid-code")
        .add_query_param("state", &state)
        .add_cookie(state_cookie)
        .await;
    callback.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(callback.header("location"), "/validator");
    callback.cookie("catalog_session")
}

#[tokio::test]
async fn test_login_redirects_with_state_cookie() {
    let (server, _) = test_server().await;

    let response = server.get("/api/auth/login").await;
    response.assert_status(StatusCode::SEE_OTHER);

    let state_cookie = response.cookie("oauth_state");
    assert!(!state_cookie.value().is_empty());
    assert_eq!(state_cookie.http_only(), Some(true));

    let location = response.header("location");
    let location = location.to_str().unwrap();
    assert!(location.starts_with(STUB_AUTHORIZE_URL));
    assert!(location.ends_with(&format!("state={}", state_cookie.value())));
}

#[tokio::test]
async fn test_login_unavailable_without_provider() {
    let server = test_server_without_login().await;

    server
        .get("/api/auth/login")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    // Catalog routes keep working
    server.get("/api/channels").await.assert_status_ok();
}

#[tokio::test]
async fn test_callback_establishes_session() {
    let (server, _) = test_server().await;
    let session = log_in(&server).await;
    assert!(!session.value().is_empty());
    assert_eq!(session.http_only(), Some(true));

    let me: Value = server.get("/api/me").add_cookie(session).await.json();
    assert_eq!(
        me,
        json!({
            "id": "80351110224678912",
            "username": "viewer",
            "email": "viewer@example.test",
            "avatar": null,
        })
    );
}

#[tokio::test]
async fn test_callback_alias_route() {
    let (server, _) = test_server().await;
    let login = server.get("/api/auth/login").await;
    let state_cookie = login.cookie("oauth_state");
    let state = state_cookie.value().to_string();

    let callback = server
        .get("/api/callback")
        .add_query_param("code", "valid-code")
        .add_query_param("state", &state)
        .add_cookie(state_cookie)
        .await;
    callback.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(callback.header("location"), "/validator");
}

#[tokio::test]
async fn test_callback_state_mismatch_fails() {
    let (server, _) = test_server().await;
    let login = server.get("/api/auth/login").await;
    let state_cookie = login.cookie("oauth_state");

    let callback = server
        .get("/api/auth/callback")
        .add_query_param("code", "valid-code")
        .add_query_param("state", "forged")
        .add_cookie(state_cookie)
        .await;
    callback.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(callback.header("location"), "/login");
}

#[tokio::test]
async fn test_callback_failures_redirect_to_login() {
    let (server, _) = test_server().await;

    // No state cookie at all
    let response = server
        .get("/api/auth/callback")
        .add_query_param("code", "valid-code")
        .add_query_param("state", "anything")
        .await;
    assert_eq!(response.header("location"), "/login");

    // Provider refused the code
    let login = server.get("/api/auth/login").await;
    let state_cookie = login.cookie("oauth_state");
    let state = state_cookie.value().to_string();
    let response = server
        .get("/api/auth/callback")
        .add_query_param("code", REJECTED_CODE)
        .add_query_param("state", &state)
        .add_cookie(state_cookie)
        .await;
    assert_eq!(response.header("location"), "/login");

    // Provider reported an error
    let response = server
        .get("/api/auth/callback")
        .add_query_param("error", "access_denied")
        .await;
    assert_eq!(response.header("location"), "/login");
}

#[tokio::test]
async fn test_repeat_login_keeps_stored_profile() {
    let (server, provider) = test_server().await;
    log_in(&server).await;

    provider.set_profile(ProviderProfile {
        username: "renamed".to_string(),
        ..viewer_profile()
    });
    let session = log_in(&server).await;

    let me: Value = server.get("/api/me").add_cookie(session).await.json();
    assert_eq!(me["username"], "viewer");
}

#[tokio::test]
async fn test_me_is_null_when_anonymous() {
    let (server, _) = test_server().await;

    let response = server.get("/api/me").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), Value::Null);

    let unknown = server
        .get("/api/me")
        .add_cookie(Cookie::new("catalog_session", "not-a-session"))
        .await;
    assert_eq!(unknown.json::<Value>(), Value::Null);
}

#[tokio::test]
async fn test_device_routes_require_session() {
    let (server, _) = test_server().await;

    // Missing session is reported before a missing MAC
    server
        .post("/api/devices/link")
        .json(&json!({}))
        .await
        .assert_status_unauthorized();
    server
        .post("/api/devices/link")
        .json(&json!({"mac": "AA:BB:CC:DD:EE:FF"}))
        .await
        .assert_status_unauthorized();
    server.get("/api/devices").await.assert_status_unauthorized();
}

#[tokio::test]
async fn test_link_device_flow() {
    let (server, _) = test_server().await;
    let session = log_in(&server).await;

    let response = server
        .post("/api/devices/link")
        .add_cookie(session.clone())
        .json(&json!({"mac": "AA:BB:CC:DD:EE:FF"}))
        .await;
    response.assert_status_ok();
    let device: Value = response.json();
    assert_eq!(device["mac"], "AA:BB:CC:DD:EE:FF");
    assert_eq!(device["name"], "LG WebOS TV");
    assert_eq!(device["userId"], "80351110224678912");

    // Linking again reuses the row
    let again: Value = server
        .post("/api/devices/link")
        .add_cookie(session.clone())
        .json(&json!({"mac": "AA:BB:CC:DD:EE:FF"}))
        .await
        .json();
    assert_eq!(again["id"], device["id"]);

    let devices: Value = server.get("/api/devices").add_cookie(session).await.json();
    assert_eq!(devices, json!([device]));
}

#[tokio::test]
async fn test_link_device_requires_mac() {
    let (server, _) = test_server().await;
    let session = log_in(&server).await;

    for body in [json!({}), json!({"mac": ""}), json!({"mac": 42})] {
        let response = server
            .post("/api/devices/link")
            .add_cookie(session.clone())
            .json(&body)
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["message"], "MAC address required");
    }

    let devices: Value = server.get("/api/devices").add_cookie(session).await.json();
    assert_eq!(devices, json!([]));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let (server, _) = test_server().await;
    let session = log_in(&server).await;

    let response = server
        .post("/api/auth/logout")
        .add_cookie(session.clone())
        .await;
    response.assert_status_ok();
    assert_eq!(response.cookie("catalog_session").value(), "");

    // The old token no longer resolves even if the browser resends it
    let me: Value = server.get("/api/me").add_cookie(session).await.json();
    assert_eq!(me, Value::Null);

    // Logging out anonymously is fine too
    server.post("/api/auth/logout").await.assert_status_ok();
}
