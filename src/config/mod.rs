use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub mod defaults;

use defaults::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub web: WebConfig,
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL the service is reachable at; used to derive the OAuth callback
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Discord OAuth2 and session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// OAuth client id. Login is disabled while this is unset.
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Callback registered with the provider. Defaults to `<base_url>/api/auth/callback`.
    #[serde(default)]
    pub redirect_uri: Option<String>,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_profile_url")]
    pub profile_url: String,
    #[serde(default = "default_session_ttl")]
    pub session_ttl: String,
    /// How long a login attempt may sit at the provider before its state cookie expires
    #[serde(default = "default_state_ttl")]
    pub state_ttl: String,
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
    #[serde(default = "default_success_redirect")]
    pub success_redirect: String,
    #[serde(default = "default_failure_redirect")]
    pub failure_redirect: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Insert the starter channel list when the catalog is empty at startup
    #[serde(default = "default_seed_defaults")]
    pub seed_defaults: bool,
    /// Name given to devices first seen during a link request
    #[serde(default = "default_device_name")]
    pub default_device_name: String,
}

// Web defaults
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

// Auth defaults
fn default_scopes() -> Vec<String> {
    DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect()
}

fn default_authorize_url() -> String {
    DEFAULT_AUTHORIZE_URL.to_string()
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

fn default_profile_url() -> String {
    DEFAULT_PROFILE_URL.to_string()
}

fn default_session_ttl() -> String {
    DEFAULT_SESSION_TTL.to_string()
}

fn default_state_ttl() -> String {
    DEFAULT_STATE_TTL.to_string()
}

fn default_secure_cookies() -> bool {
    DEFAULT_SECURE_COOKIES
}

fn default_success_redirect() -> String {
    DEFAULT_SUCCESS_REDIRECT.to_string()
}

fn default_failure_redirect() -> String {
    DEFAULT_FAILURE_REDIRECT.to_string()
}

// Catalog defaults
fn default_seed_defaults() -> bool {
    DEFAULT_SEED_DEFAULTS
}

fn default_device_name() -> String {
    DEFAULT_DEVICE_NAME.to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            scopes: default_scopes(),
            authorize_url: default_authorize_url(),
            token_url: default_token_url(),
            profile_url: default_profile_url(),
            session_ttl: default_session_ttl(),
            state_ttl: default_state_ttl(),
            secure_cookies: default_secure_cookies(),
            success_redirect: default_success_redirect(),
            failure_redirect: default_failure_redirect(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_defaults: default_seed_defaults(),
            default_device_name: default_device_name(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: Some(DEFAULT_MAX_CONNECTIONS),
            },
            web: WebConfig {
                host: default_host(),
                port: default_port(),
                base_url: default_base_url(),
            },
            auth: AuthConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Callback URL sent to the provider
    pub fn callback_url(&self, base_url: &str) -> String {
        match &self.redirect_uri {
            Some(uri) => uri.clone(),
            None => format!("{}{}", base_url.trim_end_matches('/'), DEFAULT_CALLBACK_PATH),
        }
    }

    pub fn session_ttl(&self) -> Result<Duration> {
        humantime::parse_duration(&self.session_ttl)
            .with_context(|| format!("Invalid auth.session_ttl '{}'", self.session_ttl))
    }

    pub fn state_ttl(&self) -> Result<Duration> {
        humantime::parse_duration(&self.state_ttl)
            .with_context(|| format!("Invalid auth.state_ttl '{}'", self.state_ttl))
    }
}

impl Config {
    /// Layered configuration: defaults, then the TOML file, then environment.
    ///
    /// A missing file contributes nothing. Environment keys use the
    /// `IPTV_CATALOG_` prefix with `__` between sections, and the
    /// conventional `DISCORD_CLIENT_ID`, `DISCORD_CLIENT_SECRET` and
    /// `DATABASE_URL` variables are honoured as well.
    pub fn figment(config_file: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&["DISCORD_CLIENT_ID"])
                    .map(|_| "auth.client_id".into()),
            )
            .merge(
                Env::raw()
                    .only(&["DISCORD_CLIENT_SECRET"])
                    .map(|_| "auth.client_secret".into()),
            )
            .merge(
                Env::raw()
                    .only(&["DATABASE_URL"])
                    .map(|_| "database.url".into()),
            )
    }

    pub fn load_from_file(config_file: impl AsRef<Path>) -> Result<Self> {
        let config: Config = Self::figment(config_file.as_ref())
            .extract()
            .with_context(|| {
                format!(
                    "Failed to load configuration from {}",
                    config_file.as_ref().display()
                )
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would otherwise only fail on first use
    pub fn validate(&self) -> Result<()> {
        self.auth.session_ttl()?;
        self.auth.state_ttl()?;
        if self.web.port == 0 {
            anyhow::bail!("web.port must be non-zero");
        }
        Ok(())
    }
}
