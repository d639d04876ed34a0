//! Identity gate: resolves provider logins into local users and sessions
//!
//! A browser moves from anonymous to pending (state cookie set, see the auth
//! handlers) to authenticated (session row plus cookie) and back on logout.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::auth::IdentityProvider;
use crate::database::repositories::{SessionRepository, UserRepository};
use crate::errors::{AppError, AppResult};
use crate::models::{NewUser, ProviderProfile, Session, User};

#[derive(Clone)]
pub struct IdentityService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    provider: Option<Arc<dyn IdentityProvider>>,
    session_ttl: Duration,
}

impl IdentityService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        provider: Option<Arc<dyn IdentityProvider>>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            provider,
            session_ttl,
        }
    }

    pub fn login_enabled(&self) -> bool {
        self.provider.is_some()
    }

    fn provider(&self) -> AppResult<&Arc<dyn IdentityProvider>> {
        self.provider
            .as_ref()
            .ok_or_else(|| AppError::configuration("Login is not configured"))
    }

    /// Where to send the browser to start a login bound to `state`
    pub fn login_url(&self, state: &str) -> AppResult<String> {
        self.provider()?.authorization_url(state)
    }

    /// Look the profile up by provider id, creating the user on first login.
    ///
    /// Existing users are returned as stored; later profile changes at the
    /// provider are not synced.
    pub async fn handle_callback(&self, profile: ProviderProfile) -> AppResult<User> {
        if let Some(user) = self.users.get_user(&profile.id).await? {
            debug!(user_id = %user.id, "Returning user logged in");
            return Ok(user);
        }

        let user_id = profile.id.clone();
        match self.users.create_user(NewUser::from(profile)).await {
            Ok(user) => Ok(user),
            // First login raced with another callback for the same account
            Err(e) if e.is_unique_violation() => self
                .users
                .get_user(&user_id)
                .await?
                .ok_or_else(|| AppError::internal("user vanished after concurrent creation")),
            Err(e) => Err(e.into()),
        }
    }

    /// Bind a fresh session to `user`, clearing out expired ones first
    pub async fn establish_session(&self, user: &User) -> AppResult<Session> {
        let now = Utc::now();
        self.sessions.purge_expired(now).await?;

        let ttl = chrono::Duration::from_std(self.session_ttl)
            .map_err(|e| AppError::configuration(format!("session ttl out of range: {e}")))?;
        let session = self.sessions.create_session(&user.id, now + ttl).await?;
        info!(user_id = %user.id, "Session established");
        Ok(session)
    }

    /// Full callback path: code exchange, identity resolution, session
    pub async fn complete_login(&self, code: &str) -> AppResult<(User, Session)> {
        let profile = self.provider()?.fetch_profile(code).await?;
        let user = self.handle_callback(profile).await?;
        let session = self.establish_session(&user).await?;
        Ok((user, session))
    }

    pub async fn current_user(&self, token: Option<&str>) -> AppResult<Option<User>> {
        let Some(token) = token else {
            return Ok(None);
        };
        let Some(session) = self.sessions.find_session(token).await? else {
            return Ok(None);
        };
        Ok(self.users.get_user(&session.user_id).await?)
    }

    pub async fn require_authenticated(&self, token: Option<&str>) -> AppResult<User> {
        self.current_user(token)
            .await?
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }

    /// Drop the session if it exists. Never fails.
    pub async fn logout(&self, token: Option<&str>) {
        let Some(token) = token else {
            return;
        };
        if let Err(e) = self.sessions.delete_session(token).await {
            warn!("Failed to delete session on logout: {}", e);
        } else {
            debug!("Session ended");
        }
    }
}
