//! Request extractors for session handling
//!
//! Handlers receive the caller's identity as an explicit value rather than
//! reading ambient request state.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use std::convert::Infallible;

use super::AppState;
use crate::auth::SESSION_COOKIE;
use crate::errors::AppError;
use crate::models::User;

/// Session token from the session cookie, if the browser sent one
#[derive(Debug, Clone, Default)]
pub struct SessionToken(pub Option<String>);

impl SessionToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state).await?;
        Ok(Self(
            jar.get(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_string())
                .filter(|token| !token.is_empty()),
        ))
    }
}

/// The authenticated caller. Rejects with 401 when there is no live session.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionToken(token) = SessionToken::from_request_parts(parts, state)
            .await
            .unwrap_or_default();
        let user = state.identity.require_authenticated(token.as_deref()).await?;
        Ok(Self(user))
    }
}
