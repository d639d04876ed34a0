//! Initial schema: channels, users, devices and sessions

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_channels_table(manager).await?;
        self.create_users_table(manager).await?;
        self.create_devices_table(manager).await?;
        self.create_sessions_table(manager).await?;

        self.create_indexes(manager).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reverse order for foreign keys
        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Devices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Channels::Table).to_owned())
            .await?;

        Ok(())
    }
}

impl Migration {
    /// Integer auto-increment primary key
    fn create_serial_id_column(column_name: impl sea_orm::Iden + 'static) -> ColumnDef {
        ColumnDef::new(column_name)
            .integer()
            .not_null()
            .auto_increment()
            .primary_key()
            .to_owned()
    }

    /// Timestamp column with database-specific types
    fn create_timestamp_column(
        manager: &SchemaManager<'_>,
        column_name: impl sea_orm::Iden + 'static,
    ) -> ColumnDef {
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres => ColumnDef::new(column_name)
                .timestamp_with_time_zone()
                .not_null()
                .to_owned(),
            _ => ColumnDef::new(column_name).timestamp().not_null().to_owned(),
        }
    }

    async fn create_channels_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Channels::Table)
                    .if_not_exists()
                    .col(Self::create_serial_id_column(Channels::Id))
                    .col(ColumnDef::new(Channels::Name).string().not_null())
                    .col(ColumnDef::new(Channels::StreamUrl).string().not_null())
                    .col(ColumnDef::new(Channels::LogoUrl).string())
                    .col(ColumnDef::new(Channels::Category).string().default("General"))
                    .col(ColumnDef::new(Channels::UserAgent).string())
                    .col(
                        ColumnDef::new(Channels::IsFavorite)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_users_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Avatar).string())
                    .col(Self::create_timestamp_column(manager, Users::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn create_devices_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Devices::Table)
                    .if_not_exists()
                    .col(Self::create_serial_id_column(Devices::Id))
                    .col(ColumnDef::new(Devices::Mac).string().not_null().unique_key())
                    .col(ColumnDef::new(Devices::Name).string())
                    .col(ColumnDef::new(Devices::UserId).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_devices_user_id")
                            .from(Devices::Table, Devices::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_sessions_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sessions::Token).string().not_null().primary_key())
                    .col(ColumnDef::new(Sessions::UserId).string().not_null())
                    .col(Self::create_timestamp_column(manager, Sessions::CreatedAt))
                    .col(Self::create_timestamp_column(manager, Sessions::ExpiresAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sessions_user_id")
                            .from(Sessions::Table, Sessions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_indexes(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_devices_user_id")
                    .table(Devices::Table)
                    .col(Devices::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_sessions_expires_at")
                    .table(Sessions::Table)
                    .col(Sessions::ExpiresAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Channels {
    Table,
    Id,
    Name,
    StreamUrl,
    LogoUrl,
    Category,
    UserAgent,
    IsFavorite,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    Avatar,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Devices {
    Table,
    Id,
    Mac,
    Name,
    UserId,
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    Token,
    UserId,
    CreatedAt,
    ExpiresAt,
}
