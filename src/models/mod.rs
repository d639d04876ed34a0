//! Domain types shared by the repositories, services and web layer.
//!
//! JSON field names are camelCase to match what browser clients send and
//! expect (`userAgent`, `isFavorite`, `userId`).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(description = "A named stream entry in the catalog")]
pub struct Channel {
    pub id: i32,
    #[schema(example = "RTSH 1")]
    pub name: String,
    #[schema(example = "http://example.com/rtsh1.m3u8")]
    pub url: String,
    pub logo: Option<String>,
    #[schema(example = "General")]
    pub category: Option<String>,
    pub user_agent: Option<String>,
    pub is_favorite: bool,
}

/// Validated input for channel creation, defaults already applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChannel {
    pub name: String,
    pub url: String,
    pub logo: Option<String>,
    pub category: Option<String>,
    pub user_agent: Option<String>,
    pub is_favorite: bool,
}

impl NewChannel {
    /// Channel with only the required fields and the usual defaults
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            logo: None,
            category: Some(crate::config::defaults::DEFAULT_CATEGORY.to_string()),
            user_agent: None,
            is_favorite: false,
        }
    }
}

/// Partial channel update.
///
/// The outer `Option` says whether a field was provided at all. Nullable
/// columns use an inner `Option` so an explicit `null` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelPatch {
    pub name: Option<String>,
    pub url: Option<String>,
    pub logo: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub user_agent: Option<Option<String>>,
    pub is_favorite: Option<bool>,
}

impl ChannelPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Request body accepted by `POST /api/channels` (documentation only; bodies
/// are validated from raw JSON)
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInput {
    pub name: String,
    pub url: String,
    pub logo: Option<String>,
    pub category: Option<String>,
    pub user_agent: Option<String>,
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Provider-assigned identifier
    pub id: String,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
}

/// Identity returned by the external provider after a successful handshake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

impl From<ProviderProfile> for NewUser {
    fn from(profile: ProviderProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            email: profile.email.unwrap_or_default(),
            avatar: profile.avatar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i32,
    #[schema(example = "AA:BB:CC:DD:EE:FF")]
    pub mac: String,
    pub name: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDevice {
    pub mac: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LinkDeviceRequest {
    pub mac: String,
}

/// A live server-side session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}
