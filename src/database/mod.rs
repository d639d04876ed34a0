//! SeaORM-based database implementation
//!
//! This module provides database-agnostic access using SeaORM with support for:
//! - SQLite (default, file or in-memory)
//! - PostgreSQL

use anyhow::{Context, Result};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaOrmDatabase, DatabaseConnection,
};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::config::defaults::DEFAULT_MAX_CONNECTIONS;

pub mod migrations;
pub mod repositories;

/// Database connection manager
#[derive(Clone)]
pub struct Database {
    pub connection: Arc<DatabaseConnection>,
    pub database_type: DatabaseType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    SQLite,
    PostgreSQL,
}

impl DatabaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::SQLite => "SQLite",
            DatabaseType::PostgreSQL => "PostgreSQL",
        }
    }
}

impl Database {
    /// Connect using the configured URL
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let database_type = Self::detect_database_type(&config.url)?;
        info!("Connecting to {} database", database_type.as_str());

        let connection_url = match database_type {
            DatabaseType::SQLite => Self::ensure_sqlite_auto_creation(&config.url)?,
            DatabaseType::PostgreSQL => config.url.clone(),
        };

        // Every pooled connection to sqlite::memory: would open its own empty database
        let max_connections = if Self::is_in_memory(&config.url) {
            1
        } else {
            config.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
        };

        let mut connect_options = ConnectOptions::new(&connection_url);
        connect_options
            .max_connections(max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(5))
            .acquire_timeout(Duration::from_secs(3))
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        if !Self::is_in_memory(&config.url) {
            connect_options
                .idle_timeout(Duration::from_secs(600))
                .max_lifetime(Duration::from_secs(1800));
        }

        let connection = match SeaOrmDatabase::connect(connect_options).await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!("Database connection failed: {:?}", e);
                let mut source = e.source();
                let mut level = 0;
                while let Some(err) = source {
                    tracing::error!("  Level {}: {}", level, err);
                    source = err.source();
                    level += 1;
                }
                return Err(anyhow::anyhow!(
                    "Failed to connect to {} database: {}",
                    database_type.as_str(),
                    e
                ));
            }
        };

        debug!("Database connection established successfully");

        Ok(Self {
            connection: Arc::new(connection),
            database_type,
        })
    }

    /// Fresh in-memory SQLite database with the schema applied
    pub async fn in_memory() -> Result<Self> {
        let database = Self::new(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
        })
        .await?;
        database.migrate().await?;
        Ok(database)
    }

    fn detect_database_type(url: &str) -> Result<DatabaseType> {
        if url.starts_with("sqlite:") {
            Ok(DatabaseType::SQLite)
        } else if url.starts_with("postgres:") || url.starts_with("postgresql:") {
            Ok(DatabaseType::PostgreSQL)
        } else {
            anyhow::bail!("Unsupported database URL format: {}", url);
        }
    }

    fn is_in_memory(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }

    /// Ensure SQLite URL includes auto-creation mode if needed
    fn ensure_sqlite_auto_creation(url: &str) -> Result<String> {
        if url.contains("mode=") || Self::is_in_memory(url) {
            return Ok(url.to_string());
        }

        let file_path = if let Some(path) = url.strip_prefix("sqlite://") {
            path
        } else if let Some(path) = url.strip_prefix("sqlite:") {
            path
        } else {
            anyhow::bail!("Invalid SQLite URL format: {}", url);
        };
        let file_path = file_path.split('?').next().unwrap_or(file_path);

        let path = std::path::Path::new(file_path);
        if path.exists() {
            debug!("SQLite database file already exists: {}", file_path);
            return Ok(url.to_string());
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!(
                        "Failed to create directory for SQLite database: {}",
                        parent.display()
                    )
                })?;
                info!("Created directory for SQLite database: {}", parent.display());
            }
        }

        let auto_create_url = if url.contains('?') {
            format!("{}&mode=rwc", url)
        } else {
            format!("{}?mode=rwc", url)
        };

        debug!("Enabled SQLite auto-creation: {}", auto_create_url);
        Ok(auto_create_url)
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        use migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        info!(
            "Running database migrations for {}",
            self.database_type.as_str()
        );

        Migrator::up(&*self.connection, None)
            .await
            .context("Failed to run migrations")?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Round-trip a trivial statement; used by the health endpoints
    pub async fn ping(&self) -> bool {
        match self.connection.execute_unprepared("SELECT 1").await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("Database ping failed: {}", e);
                false
            }
        }
    }

    pub fn connection(&self) -> Arc<DatabaseConnection> {
        self.connection.clone()
    }

    pub fn database_type(&self) -> DatabaseType {
        self.database_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_database_type() {
        assert_eq!(
            Database::detect_database_type("sqlite://./data/db.sqlite").unwrap(),
            DatabaseType::SQLite
        );
        assert_eq!(
            Database::detect_database_type("postgres://u:p@localhost/catalog").unwrap(),
            DatabaseType::PostgreSQL
        );
        assert_eq!(
            Database::detect_database_type("postgresql://localhost/catalog").unwrap(),
            DatabaseType::PostgreSQL
        );
        assert!(Database::detect_database_type("mysql://localhost/catalog").is_err());
    }

    #[test]
    fn test_sqlite_auto_creation_appends_mode() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("catalog.db");
        let url = format!("sqlite://{}", db_path.display());

        let modified = Database::ensure_sqlite_auto_creation(&url).unwrap();
        assert_eq!(modified, format!("{}?mode=rwc", url));
        assert!(db_path.parent().unwrap().exists());
    }

    #[test]
    fn test_in_memory_url_untouched() {
        assert_eq!(
            Database::ensure_sqlite_auto_creation("sqlite::memory:").unwrap(),
            "sqlite::memory:"
        );
    }

    #[tokio::test]
    async fn test_in_memory_database_migrates_and_pings() {
        let database = Database::in_memory().await.unwrap();
        assert_eq!(database.database_type(), DatabaseType::SQLite);
        assert!(database.ping().await);
        // Migrations are idempotent
        database.migrate().await.unwrap();
    }
}
