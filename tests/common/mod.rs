//! Shared fixtures for the HTTP integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::{Arc, Mutex};

use iptv_catalog::auth::IdentityProvider;
use iptv_catalog::config::Config;
use iptv_catalog::database::Database;
use iptv_catalog::errors::{AppError, AppResult};
use iptv_catalog::models::ProviderProfile;
use iptv_catalog::web::{AppState, create_router};

pub const STUB_AUTHORIZE_URL: &str = "https://id.example.test/authorize";
/// Callback code the stub provider refuses
pub const REJECTED_CODE: &str = "rejected";

/// Provider that answers every code with a fixed, swappable profile
pub struct StubProvider {
    profile: Mutex<ProviderProfile>,
}

impl StubProvider {
    pub fn new(profile: ProviderProfile) -> Self {
        Self {
            profile: Mutex::new(profile),
        }
    }

    pub fn set_profile(&self, profile: ProviderProfile) {
        *self.profile.lock().unwrap() = profile;
    }
}

#[async_trait]
impl IdentityProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn authorization_url(&self, state: &str) -> AppResult<String> {
        Ok(format!("{STUB_AUTHORIZE_URL}?state={state}"))
    }

    async fn fetch_profile(&self, code: &str) -> AppResult<ProviderProfile> {
        if code == REJECTED_CODE {
            return Err(AppError::external_service("stub", "invalid_grant"));
        }
        Ok(self.profile.lock().unwrap().clone())
    }
}

pub fn viewer_profile() -> ProviderProfile {
    ProviderProfile {
        id: "80351110224678912".to_string(),
        username: "viewer".to_string(),
        email: Some("viewer@example.test".to_string()),
        avatar: None,
    }
}

/// Server over a fresh in-memory store with a stub login provider
pub async fn test_server() -> (TestServer, Arc<StubProvider>) {
    let provider = Arc::new(StubProvider::new(viewer_profile()));
    let database = Database::in_memory().await.unwrap();
    let state = AppState::new(
        Config::default(),
        database,
        Some(provider.clone() as Arc<dyn IdentityProvider>),
    )
    .unwrap();
    (TestServer::new(create_router(state)).unwrap(), provider)
}

/// Server with login unconfigured
pub async fn test_server_without_login() -> TestServer {
    let database = Database::in_memory().await.unwrap();
    let state = AppState::new(Config::default(), database, None).unwrap();
    TestServer::new(create_router(state)).unwrap()
}
