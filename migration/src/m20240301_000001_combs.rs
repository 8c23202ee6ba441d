use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Combs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Combs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Combs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Combs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Combs::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // soft-delete lookups
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_combs_deleted_at")
                    .table(Combs::Table)
                    .col(Combs::DeletedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_combs_deleted_at").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Combs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Combs {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
