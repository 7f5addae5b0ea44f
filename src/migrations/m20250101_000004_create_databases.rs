//! Migration: Create databases table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Databases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Databases::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Databases::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Databases::Type).string().not_null())
                    .col(ColumnDef::new(Databases::ProjectId).big_integer().null())
                    .col(
                        ColumnDef::new(Databases::ConnectionString)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Databases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_databases_project_id")
                    .table(Databases::Table)
                    .col(Databases::ProjectId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Databases::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
enum Databases {
    Table,
    Id,
    Name,
    Type,
    #[iden = "project_id"]
    ProjectId,
    #[iden = "connection_string"]
    ConnectionString,
    #[iden = "created_at"]
    CreatedAt,
}
