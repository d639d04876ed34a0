//! SeaORM-based User repository implementation

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;

use super::traits::UserRepository;
use crate::entities::{prelude::Users, users};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{NewUser, User};

#[derive(Clone)]
pub struct UserSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl UserSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    fn model_to_domain(model: users::Model) -> User {
        User {
            id: model.id,
            username: model.username,
            email: model.email,
            avatar: model.avatar,
        }
    }
}

#[async_trait]
impl UserRepository for UserSeaOrmRepository {
    async fn get_user(&self, id: &str) -> RepositoryResult<Option<User>> {
        let model = Users::find_by_id(id.to_string())
            .one(&*self.connection)
            .await?;
        Ok(model.map(Self::model_to_domain))
    }

    async fn create_user(&self, user: NewUser) -> RepositoryResult<User> {
        let active_model = users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username),
            email: Set(user.email),
            avatar: Set(user.avatar),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(&*self.connection)
            .await
            .map_err(|e| RepositoryError::from_db(e, "users_pkey"))?;
        tracing::info!(user_id = %model.id, username = %model.username, "Created user");
        Ok(Self::model_to_domain(model))
    }
}
