//! Catalog service: channel CRUD, playlist export and device linking
//!
//! Validates untrusted input before it reaches a repository and resolves
//! existence up front so a missing channel is a clean NotFound.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::validation::{validate_channel_patch, validate_new_channel};
use crate::database::repositories::{ChannelRepository, DeviceRepository};
use crate::errors::{AppError, AppResult, RepositoryError};
use crate::models::{Channel, Device, NewChannel, NewDevice};
use crate::playlist::render_playlist;

pub const CHANNEL_RESOURCE: &str = "Channel";
pub const DEVICE_RESOURCE: &str = "Device";
pub const MAC_REQUIRED: &str = "MAC address required";

#[derive(Clone)]
pub struct CatalogService {
    channels: Arc<dyn ChannelRepository>,
    devices: Arc<dyn DeviceRepository>,
    default_device_name: String,
}

impl CatalogService {
    pub fn new(
        channels: Arc<dyn ChannelRepository>,
        devices: Arc<dyn DeviceRepository>,
        default_device_name: impl Into<String>,
    ) -> Self {
        Self {
            channels,
            devices,
            default_device_name: default_device_name.into(),
        }
    }

    pub async fn list_channels(&self) -> AppResult<Vec<Channel>> {
        Ok(self.channels.list_channels().await?)
    }

    pub async fn get_channel(&self, id: i32) -> AppResult<Channel> {
        self.channels
            .get_channel(id)
            .await?
            .ok_or_else(|| AppError::not_found(CHANNEL_RESOURCE, id))
    }

    pub async fn create_channel(&self, body: &Value) -> AppResult<Channel> {
        let input = validate_new_channel(body)?;
        let channel = self.channels.create_channel(input).await?;
        info!(channel_id = channel.id, name = %channel.name, "Channel created");
        Ok(channel)
    }

    /// Existence is checked before the body is validated, so an unknown id is
    /// always 404 even when the body is also invalid
    pub async fn update_channel(&self, id: i32, body: &Value) -> AppResult<Channel> {
        self.get_channel(id).await?;

        let patch = validate_channel_patch(body)?;
        match self.channels.update_channel(id, patch).await {
            Ok(channel) => {
                debug!(channel_id = id, "Channel updated");
                Ok(channel)
            }
            // Deleted between the check and the update
            Err(RepositoryError::RecordNotFound { .. }) => {
                Err(AppError::not_found(CHANNEL_RESOURCE, id))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete_channel(&self, id: i32) -> AppResult<()> {
        self.get_channel(id).await?;
        self.channels.delete_channel(id).await?;
        info!(channel_id = id, "Channel deleted");
        Ok(())
    }

    pub async fn export_playlist(&self) -> AppResult<String> {
        let channels = self.channels.list_channels().await?;
        debug!(count = channels.len(), "Rendering playlist");
        Ok(render_playlist(&channels))
    }

    /// Insert `channels` when the catalog is empty; returns how many were added
    pub async fn seed_if_empty(&self, channels: Vec<NewChannel>) -> AppResult<usize> {
        if !self.channels.list_channels().await?.is_empty() {
            debug!("Catalog already populated, skipping seed");
            return Ok(0);
        }

        let count = channels.len();
        for channel in channels {
            self.channels.create_channel(channel).await?;
        }
        info!(count, "Seeded empty catalog with default channels");
        Ok(count)
    }

    /// Find or register the device by MAC, then assign it to `user_id`
    pub async fn link_device(&self, mac: &str, user_id: &str) -> AppResult<Device> {
        if mac.is_empty() {
            return Err(AppError::validation("mac", MAC_REQUIRED));
        }

        if self.devices.get_device_by_mac(mac).await?.is_none() {
            let new_device = NewDevice {
                mac: mac.to_string(),
                name: Some(self.default_device_name.clone()),
            };
            match self.devices.create_device(new_device).await {
                Ok(device) => {
                    info!(device_id = device.id, mac, "Registered new device");
                }
                // A concurrent request registered the same MAC first
                Err(e) if e.is_unique_violation() => {
                    warn!(mac, "Device registered concurrently, continuing with lookup");
                }
                Err(e) => return Err(e.into()),
            }
        }

        match self.devices.link_device(mac, user_id).await {
            Ok(device) => {
                info!(device_id = device.id, mac, user_id, "Device linked");
                Ok(device)
            }
            Err(RepositoryError::RecordNotFound { .. }) => {
                Err(AppError::not_found(DEVICE_RESOURCE, mac))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list_devices_for_user(&self, user_id: &str) -> AppResult<Vec<Device>> {
        Ok(self.devices.list_devices_for_user(user_id).await?)
    }
}
