//! Login handshake, current-user lookup and logout

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

use crate::auth::{SESSION_COOKIE, STATE_COOKIE, generate_state};
use crate::errors::AppResult;
use crate::models::User;
use crate::web::AppState;
use crate::web::extractors::SessionToken;
use crate::web::responses::ErrorResponse;

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

fn build_cookie(name: &'static str, value: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_http_only(true);
    cookie.set_same_site(Some(SameSite::Lax));
    cookie.set_path("/");
    cookie.set_secure(secure);
    cookie.set_max_age(time::Duration::try_from(max_age).ok());
    cookie
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::from(name);
    cookie.set_path("/");
    cookie
}

#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = "auth",
    responses(
        (status = 303, description = "Redirect to the identity provider"),
        (status = 503, description = "Login is not configured", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    let login_state = generate_state();
    let url = state.identity.login_url(&login_state)?;

    let cookie = build_cookie(
        STATE_COOKIE,
        login_state,
        state.state_ttl,
        state.config.auth.secure_cookies,
    );
    Ok((jar.add(cookie), Redirect::to(&url)))
}

/// Provider redirect target. Always answers with a redirect: the success
/// page once a session exists, the login page otherwise.
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = "auth",
    params(
        ("code" = Option<String>, Query, description = "Authorization code"),
        ("state" = Option<String>, Query, description = "Value issued by the login redirect"),
        ("error" = Option<String>, Query, description = "Provider-reported error"),
    ),
    responses(
        (status = 303, description = "Redirect to the success or failure page"),
    )
)]
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> (CookieJar, Redirect) {
    let auth = &state.config.auth;
    let expected_state = jar.get(STATE_COOKIE).map(|c| c.value().to_string());
    let jar = jar.remove(removal_cookie(STATE_COOKIE));
    let failure = |jar: CookieJar| (jar, Redirect::to(&auth.failure_redirect));

    if let Some(error) = params.error {
        warn!(error = %error, "Identity provider reported an error");
        return failure(jar);
    }
    let Some(code) = params.code else {
        warn!("Login callback without authorization code");
        return failure(jar);
    };
    match (expected_state.as_deref(), params.state.as_deref()) {
        (Some(expected), Some(received)) if expected == received => {}
        _ => {
            warn!("Login callback state mismatch");
            return failure(jar);
        }
    }

    match state.identity.complete_login(&code).await {
        Ok((user, session)) => {
            info!(user_id = %user.id, username = %user.username, "User logged in");
            let cookie = build_cookie(
                SESSION_COOKIE,
                session.token,
                state.session_ttl,
                auth.secure_cookies,
            );
            (jar.add(cookie), Redirect::to(&auth.success_redirect))
        }
        Err(e) => {
            warn!("Login failed: {}", e);
            failure(jar)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/me",
    tag = "auth",
    responses(
        (status = 200, description = "The logged-in user, or null when anonymous", body = User),
    )
)]
pub async fn me(
    State(state): State<AppState>,
    token: SessionToken,
) -> AppResult<Json<Option<User>>> {
    Ok(Json(state.identity.current_user(token.as_deref()).await?))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session ended"),
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    state.identity.logout(token.as_deref()).await;
    (jar.remove(removal_cookie(SESSION_COOKIE)), StatusCode::OK)
}
