use sea_orm_migration::prelude::*;

use crate::m20240301_000001_combs::Combs;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Honey::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Honey::CombId).integer().not_null())
                    .col(ColumnDef::new(Honey::Type).string().not_null())
                    .col(
                        ColumnDef::new(Honey::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Honey::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Honey::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Honey::Visits)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(Index::create().col(Honey::CombId).col(Honey::Type))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_honey_comb_id")
                            .from(Honey::Table, Honey::CombId)
                            .to(Combs::Table, Combs::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_honey_comb_id")
                    .table(Honey::Table)
                    .col(Honey::CombId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_honey_comb_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Honey::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Honey {
    Table,
    CombId,
    Type,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
    Visits,
}
