//! Discord OAuth2 provider

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};
use url::Url;

use super::provider::IdentityProvider;
use crate::config::AuthConfig;
use crate::errors::{AppError, AppResult};
use crate::models::ProviderProfile;

const PROVIDER_NAME: &str = "discord";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct DiscordUser {
    id: String,
    username: String,
    email: Option<String>,
    avatar: Option<String>,
}

impl From<DiscordUser> for ProviderProfile {
    fn from(user: DiscordUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
        }
    }
}

pub struct DiscordProvider {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scopes: Vec<String>,
    authorize_url: String,
    token_url: String,
    profile_url: String,
}

impl DiscordProvider {
    /// `None` when no client id is configured, which disables login
    pub fn from_config(auth: &AuthConfig, base_url: &str) -> Option<Self> {
        let client_id = auth.client_id.clone().filter(|id| !id.is_empty())?;
        Some(Self {
            client: reqwest::Client::new(),
            client_id,
            client_secret: auth.client_secret.clone().unwrap_or_default(),
            redirect_uri: auth.callback_url(base_url),
            scopes: auth.scopes.clone(),
            authorize_url: auth.authorize_url.clone(),
            token_url: auth.token_url.clone(),
            profile_url: auth.profile_url.clone(),
        })
    }

    async fn exchange_code(&self, code: &str) -> AppResult<String> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!("Discord token exchange failed: {}", e);
                AppError::external_service(PROVIDER_NAME, format!("token exchange failed: {e}"))
            })?;

        let token: TokenResponse = response.json().await.map_err(|e| {
            AppError::external_service(PROVIDER_NAME, format!("invalid token response: {e}"))
        })?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl IdentityProvider for DiscordProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn authorization_url(&self, state: &str) -> AppResult<String> {
        let mut url = Url::parse(&self.authorize_url).map_err(|e| {
            AppError::configuration(format!("invalid auth.authorize_url: {e}"))
        })?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &self.scopes.join(" "))
            .append_pair("state", state);
        Ok(url.to_string())
    }

    async fn fetch_profile(&self, code: &str) -> AppResult<ProviderProfile> {
        let access_token = self.exchange_code(code).await?;

        let user: DiscordUser = self
            .client
            .get(&self.profile_url)
            .bearer_auth(access_token)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!("Discord profile request failed: {}", e);
                AppError::external_service(PROVIDER_NAME, format!("profile request failed: {e}"))
            })?
            .json()
            .await
            .map_err(|e| {
                AppError::external_service(PROVIDER_NAME, format!("invalid profile response: {e}"))
            })?;

        debug!(user_id = %user.id, username = %user.username, "Fetched Discord profile");
        Ok(user.into())
    }
}
