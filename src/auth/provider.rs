use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::ProviderProfile;

/// An OAuth2 authorization-code provider that resolves to a stable identity
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Short name used in logs and error bodies
    fn name(&self) -> &str;

    /// URL the browser is redirected to, carrying `state` through the round trip
    fn authorization_url(&self, state: &str) -> AppResult<String>;

    /// Exchange the callback `code` and fetch the caller's profile
    async fn fetch_profile(&self, code: &str) -> AppResult<ProviderProfile>;
}
