//! External identity provider plumbing for the login handshake

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

pub mod discord;
pub mod provider;

pub use discord::DiscordProvider;
pub use provider::IdentityProvider;

/// Cookie carrying the server-side session token
pub const SESSION_COOKIE: &str = "catalog_session";
/// Cookie marking a login that is waiting for the provider callback
pub const STATE_COOKIE: &str = "oauth_state";

/// Random, URL-safe value binding a callback to the browser that started it
pub fn generate_state() -> String {
    let mut bytes = [0u8; 24];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_random_and_url_safe() {
        let a = generate_state();
        let b = generate_state();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(!a.contains('=') && !a.contains('+') && !a.contains('/'));
    }
}
