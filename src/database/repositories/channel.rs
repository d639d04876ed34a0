//! SeaORM-based Channel repository implementation

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, NotSet, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::debug;

use super::traits::ChannelRepository;
use crate::entities::{channels, prelude::Channels};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{Channel, ChannelPatch, NewChannel};

/// SeaORM-based repository for Channel operations
#[derive(Clone)]
pub struct ChannelSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl ChannelSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Convert SeaORM model to domain model
    fn model_to_domain(model: channels::Model) -> Channel {
        Channel {
            id: model.id,
            name: model.name,
            url: model.stream_url,
            logo: model.logo_url,
            category: model.category,
            user_agent: model.user_agent,
            is_favorite: model.is_favorite,
        }
    }
}

#[async_trait]
impl ChannelRepository for ChannelSeaOrmRepository {
    async fn list_channels(&self) -> RepositoryResult<Vec<Channel>> {
        let models = Channels::find()
            .order_by_asc(channels::Column::Id)
            .all(&*self.connection)
            .await?;
        Ok(models.into_iter().map(Self::model_to_domain).collect())
    }

    async fn get_channel(&self, id: i32) -> RepositoryResult<Option<Channel>> {
        let model = Channels::find_by_id(id).one(&*self.connection).await?;
        Ok(model.map(Self::model_to_domain))
    }

    async fn create_channel(&self, channel: NewChannel) -> RepositoryResult<Channel> {
        let active_model = channels::ActiveModel {
            id: NotSet,
            name: Set(channel.name),
            stream_url: Set(channel.url),
            logo_url: Set(channel.logo),
            category: Set(channel.category),
            user_agent: Set(channel.user_agent),
            is_favorite: Set(channel.is_favorite),
        };

        let model = active_model.insert(&*self.connection).await?;
        debug!(channel_id = model.id, name = %model.name, "Inserted channel");
        Ok(Self::model_to_domain(model))
    }

    async fn update_channel(&self, id: i32, patch: ChannelPatch) -> RepositoryResult<Channel> {
        let model = Channels::find_by_id(id)
            .one(&*self.connection)
            .await?
            .ok_or_else(|| RepositoryError::record_not_found("channels", "id", id))?;

        let mut active_model = model.clone().into_active_model();
        if let Some(name) = patch.name {
            active_model.name = Set(name);
        }
        if let Some(url) = patch.url {
            active_model.stream_url = Set(url);
        }
        if let Some(logo) = patch.logo {
            active_model.logo_url = Set(logo);
        }
        if let Some(category) = patch.category {
            active_model.category = Set(category);
        }
        if let Some(user_agent) = patch.user_agent {
            active_model.user_agent = Set(user_agent);
        }
        if let Some(is_favorite) = patch.is_favorite {
            active_model.is_favorite = Set(is_favorite);
        }

        // SeaORM refuses an UPDATE with no SET columns
        if !active_model.is_changed() {
            return Ok(Self::model_to_domain(model));
        }

        let updated = active_model.update(&*self.connection).await?;
        debug!(channel_id = id, "Updated channel");
        Ok(Self::model_to_domain(updated))
    }

    async fn delete_channel(&self, id: i32) -> RepositoryResult<()> {
        let result = Channels::delete_by_id(id).exec(&*self.connection).await?;
        debug!(channel_id = id, rows = result.rows_affected, "Deleted channel");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    async fn repository() -> ChannelSeaOrmRepository {
        let database = Database::in_memory().await.unwrap();
        ChannelSeaOrmRepository::new(database.connection())
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_channel() {
        let repo = repository().await;
        let created = repo
            .create_channel(NewChannel::new("RTSH 1", "http://x/y.m3u8"))
            .await
            .unwrap();

        assert!(created.id > 0);
        assert_eq!(created.category.as_deref(), Some("General"));
        assert!(!created.is_favorite);

        let fetched = repo.get_channel(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = repository().await;
        for name in ["B", "A", "C"] {
            repo.create_channel(NewChannel::new(name, "http://x"))
                .await
                .unwrap();
        }

        let names: Vec<_> = repo
            .list_channels()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[tokio::test]
    async fn test_update_applies_only_provided_fields() {
        let repo = repository().await;
        let mut input = NewChannel::new("Top Channel", "http://x/top");
        input.logo = Some("http://x/logo.png".to_string());
        let created = repo.create_channel(input).await.unwrap();

        let updated = repo
            .update_channel(
                created.id,
                ChannelPatch {
                    is_favorite: Some(true),
                    logo: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.is_favorite);
        assert_eq!(updated.logo, None);
        assert_eq!(updated.name, "Top Channel");
        assert_eq!(updated.url, "http://x/top");
        assert_eq!(updated.category.as_deref(), Some("General"));
    }

    #[tokio::test]
    async fn test_empty_update_leaves_channel_unchanged() {
        let repo = repository().await;
        let created = repo
            .create_channel(NewChannel::new("News 24", "http://x/news"))
            .await
            .unwrap();

        let updated = repo
            .update_channel(created.id, ChannelPatch::default())
            .await
            .unwrap();
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn test_update_missing_channel_is_record_not_found() {
        let repo = repository().await;
        let err = repo
            .update_channel(9999, ChannelPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::RecordNotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = repository().await;
        let created = repo
            .create_channel(NewChannel::new("Klan Kosova", "http://x/kk"))
            .await
            .unwrap();

        repo.delete_channel(created.id).await.unwrap();
        repo.delete_channel(created.id).await.unwrap();
        repo.delete_channel(9999).await.unwrap();
        assert!(repo.get_channel(created.id).await.unwrap().is_none());
    }
}
