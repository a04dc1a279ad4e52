use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `ratings` table and its columns.
#[derive(DeriveIden)]
enum Ratings {
    Table,
    Id,
    OrderId,
    FromUserId,
    FromUserName,
    ToUserId,
    ToUserName,
    Rating,
    Review,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Ratings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Ratings::OrderId).uuid().not_null())
                    .col(ColumnDef::new(Ratings::FromUserId).uuid().not_null())
                    .col(ColumnDef::new(Ratings::FromUserName).string().not_null())
                    .col(ColumnDef::new(Ratings::ToUserId).uuid().not_null())
                    .col(ColumnDef::new(Ratings::ToUserName).string().not_null())
                    .col(ColumnDef::new(Ratings::Rating).double().not_null())
                    .col(ColumnDef::new(Ratings::Review).text())
                    .col(
                        ColumnDef::new(Ratings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_order_id")
                            .from(Ratings::Table, Ratings::OrderId)
                            .to(Orders::Table, Orders::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One rating per (order, rater); backs the engine's duplicate check.
        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_order_rater_unique")
                    .table(Ratings::Table)
                    .col(Ratings::OrderId)
                    .col(Ratings::FromUserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Aggregate recomputation scans by recipient.
        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_to_user_id")
                    .table(Ratings::Table)
                    .col(Ratings::ToUserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ratings::Table).to_owned())
            .await
    }
}
