//! Migration: Create system_metrics table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SystemMetrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemMetrics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SystemMetrics::CpuUsage).integer().not_null())
                    .col(
                        ColumnDef::new(SystemMetrics::MemoryUsage)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SystemMetrics::DiskUsage).integer().not_null())
                    .col(
                        ColumnDef::new(SystemMetrics::NetworkUsage)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemMetrics::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_system_metrics_timestamp")
                    .table(SystemMetrics::Table)
                    .col(SystemMetrics::Timestamp)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(SystemMetrics::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum SystemMetrics {
    Table,
    Id,
    #[iden = "cpu_usage"]
    CpuUsage,
    #[iden = "memory_usage"]
    MemoryUsage,
    #[iden = "disk_usage"]
    DiskUsage,
    #[iden = "network_usage"]
    NetworkUsage,
    Timestamp,
}
