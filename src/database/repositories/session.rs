//! SeaORM-based Session repository implementation

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use rand::RngCore;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use tracing::debug;

use super::traits::SessionRepository;
use crate::entities::{prelude::Sessions, sessions};
use crate::errors::RepositoryResult;
use crate::models::Session;

#[derive(Clone)]
pub struct SessionSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl SessionSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// 32 random bytes, URL-safe base64 without padding
    fn generate_token() -> String {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    fn model_to_domain(model: sessions::Model) -> Session {
        Session {
            token: model.token,
            user_id: model.user_id,
            expires_at: model.expires_at,
        }
    }
}

#[async_trait]
impl SessionRepository for SessionSeaOrmRepository {
    async fn create_session(
        &self,
        user_id: &str,
        expires_at: DateTime<Utc>,
    ) -> RepositoryResult<Session> {
        let active_model = sessions::ActiveModel {
            token: Set(Self::generate_token()),
            user_id: Set(user_id.to_string()),
            created_at: Set(Utc::now()),
            expires_at: Set(expires_at),
        };

        let model = active_model.insert(&*self.connection).await?;
        debug!(user_id = %model.user_id, expires_at = %model.expires_at, "Created session");
        Ok(Self::model_to_domain(model))
    }

    async fn find_session(&self, token: &str) -> RepositoryResult<Option<Session>> {
        let Some(model) = Sessions::find_by_id(token.to_string())
            .one(&*self.connection)
            .await?
        else {
            return Ok(None);
        };

        if model.expires_at <= Utc::now() {
            debug!(user_id = %model.user_id, "Discarding expired session");
            Sessions::delete_by_id(model.token)
                .exec(&*self.connection)
                .await?;
            return Ok(None);
        }

        Ok(Some(Self::model_to_domain(model)))
    }

    async fn delete_session(&self, token: &str) -> RepositoryResult<()> {
        Sessions::delete_by_id(token.to_string())
            .exec(&*self.connection)
            .await?;
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> RepositoryResult<u64> {
        let result = Sessions::delete_many()
            .filter(sessions::Column::ExpiresAt.lte(now))
            .exec(&*self.connection)
            .await?;
        if result.rows_affected > 0 {
            debug!(count = result.rows_affected, "Purged expired sessions");
        }
        Ok(result.rows_affected)
    }
}
