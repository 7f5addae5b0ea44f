//! Migration: Create activities table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Activities::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Activities::Type).string().not_null())
                    .col(ColumnDef::new(Activities::Description).string().not_null())
                    .col(ColumnDef::new(Activities::ProjectId).big_integer().null())
                    .col(
                        ColumnDef::new(Activities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activities_created_at")
                    .table(Activities::Table)
                    .col(Activities::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activities_project_id")
                    .table(Activities::Table)
                    .col(Activities::ProjectId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Activities::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
enum Activities {
    Table,
    Id,
    Type,
    Description,
    #[iden = "project_id"]
    ProjectId,
    #[iden = "created_at"]
    CreatedAt,
}
