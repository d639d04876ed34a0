/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Database defaults
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./data/iptv-catalog.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

// Auth defaults (Discord OAuth2)
pub const DEFAULT_AUTHORIZE_URL: &str = "https://discord.com/oauth2/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
pub const DEFAULT_PROFILE_URL: &str = "https://discord.com/api/users/@me";
pub const DEFAULT_SCOPES: &[&str] = &["identify", "email"];
pub const DEFAULT_CALLBACK_PATH: &str = "/api/auth/callback";
pub const DEFAULT_SESSION_TTL: &str = "30d";
pub const DEFAULT_STATE_TTL: &str = "10m";
pub const DEFAULT_SECURE_COOKIES: bool = false;
pub const DEFAULT_SUCCESS_REDIRECT: &str = "/validator";
pub const DEFAULT_FAILURE_REDIRECT: &str = "/login";

// Catalog defaults
pub const DEFAULT_SEED_DEFAULTS: bool = true;
pub const DEFAULT_DEVICE_NAME: &str = "LG WebOS TV";
pub const DEFAULT_CATEGORY: &str = "General";

// Environment
pub const ENV_PREFIX: &str = "IPTV_CATALOG_";
