//! SeaORM-based Device repository implementation

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, NotSet,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::debug;

use super::traits::DeviceRepository;
use crate::entities::{devices, prelude::Devices};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{Device, NewDevice};

#[derive(Clone)]
pub struct DeviceSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl DeviceSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    fn model_to_domain(model: devices::Model) -> Device {
        Device {
            id: model.id,
            mac: model.mac,
            name: model.name,
            user_id: model.user_id,
        }
    }

    async fn find_model_by_mac(&self, mac: &str) -> RepositoryResult<Option<devices::Model>> {
        Ok(Devices::find()
            .filter(devices::Column::Mac.eq(mac))
            .one(&*self.connection)
            .await?)
    }
}

#[async_trait]
impl DeviceRepository for DeviceSeaOrmRepository {
    async fn get_device_by_mac(&self, mac: &str) -> RepositoryResult<Option<Device>> {
        Ok(self.find_model_by_mac(mac).await?.map(Self::model_to_domain))
    }

    async fn create_device(&self, device: NewDevice) -> RepositoryResult<Device> {
        let active_model = devices::ActiveModel {
            id: NotSet,
            mac: Set(device.mac),
            name: Set(device.name),
            user_id: Set(None),
        };

        let model = active_model
            .insert(&*self.connection)
            .await
            .map_err(|e| RepositoryError::from_db(e, "devices_mac_key"))?;
        debug!(device_id = model.id, mac = %model.mac, "Registered device");
        Ok(Self::model_to_domain(model))
    }

    async fn link_device(&self, mac: &str, user_id: &str) -> RepositoryResult<Device> {
        let model = self
            .find_model_by_mac(mac)
            .await?
            .ok_or_else(|| RepositoryError::record_not_found("devices", "mac", mac))?;

        let mut active_model = model.into_active_model();
        active_model.user_id = Set(Some(user_id.to_string()));
        let updated = active_model.update(&*self.connection).await?;
        Ok(Self::model_to_domain(updated))
    }

    async fn list_devices_for_user(&self, user_id: &str) -> RepositoryResult<Vec<Device>> {
        let models = Devices::find()
            .filter(devices::Column::UserId.eq(user_id))
            .order_by_asc(devices::Column::Id)
            .all(&*self.connection)
            .await?;
        Ok(models.into_iter().map(Self::model_to_domain).collect())
    }
}
