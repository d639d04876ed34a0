//! Repository contracts
//!
//! Services depend on these traits rather than on the SeaORM structs so
//! tests can substitute mocks and assert which store calls happen.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::RepositoryResult;
use crate::models::{Channel, ChannelPatch, Device, NewChannel, NewDevice, NewUser, Session, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// All channels, ascending by id
    async fn list_channels(&self) -> RepositoryResult<Vec<Channel>>;

    async fn get_channel(&self, id: i32) -> RepositoryResult<Option<Channel>>;

    async fn create_channel(&self, channel: NewChannel) -> RepositoryResult<Channel>;

    /// Apply the provided fields only; `RecordNotFound` when the id is absent
    async fn update_channel(&self, id: i32, patch: ChannelPatch) -> RepositoryResult<Channel>;

    /// No-op when the id is absent
    async fn delete_channel(&self, id: i32) -> RepositoryResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user(&self, id: &str) -> RepositoryResult<Option<User>>;

    async fn create_user(&self, user: NewUser) -> RepositoryResult<User>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    async fn get_device_by_mac(&self, mac: &str) -> RepositoryResult<Option<Device>>;

    /// `ConstraintViolation` when the MAC is already registered
    async fn create_device(&self, device: NewDevice) -> RepositoryResult<Device>;

    /// Set the owner of an existing device; `RecordNotFound` when the MAC is unknown
    async fn link_device(&self, mac: &str, user_id: &str) -> RepositoryResult<Device>;

    async fn list_devices_for_user(&self, user_id: &str) -> RepositoryResult<Vec<Device>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create_session(
        &self,
        user_id: &str,
        expires_at: DateTime<Utc>,
    ) -> RepositoryResult<Session>;

    /// Live session for the token. Expired rows are removed and reported as absent.
    async fn find_session(&self, token: &str) -> RepositoryResult<Option<Session>>;

    async fn delete_session(&self, token: &str) -> RepositoryResult<()>;

    /// Remove every session that expired before `now`, returning the count
    async fn purge_expired(&self, now: DateTime<Utc>) -> RepositoryResult<u64>;
}
