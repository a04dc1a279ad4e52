use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `orders` table and its columns.
#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    OrderType,
    GigId,
    ServiceId,
    BuyerId,
    BuyerName,
    ProviderId,
    ProviderName,
    TotalAmount,
    Commission,
    Status,
    CreatedAt,
    CancelledAt,
}

#[derive(DeriveIden)]
enum Gigs {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Orders::OrderType).string().not_null())
                    .col(ColumnDef::new(Orders::GigId).uuid())
                    .col(ColumnDef::new(Orders::ServiceId).uuid())
                    .col(ColumnDef::new(Orders::BuyerId).uuid().not_null())
                    .col(ColumnDef::new(Orders::BuyerName).string().not_null())
                    .col(ColumnDef::new(Orders::ProviderId).uuid().not_null())
                    .col(ColumnDef::new(Orders::ProviderName).string().not_null())
                    .col(ColumnDef::new(Orders::TotalAmount).double().not_null())
                    .col(ColumnDef::new(Orders::Commission).double().not_null())
                    .col(
                        ColumnDef::new(Orders::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Orders::CancelledAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_gig_id")
                            .from(Orders::Table, Orders::GigId)
                            .to(Gigs::Table, Gigs::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_service_id")
                            .from(Orders::Table, Orders::ServiceId)
                            .to(Services::Table, Services::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // The "my orders" listing filters on either party column.
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_buyer_id")
                    .table(Orders::Table)
                    .col(Orders::BuyerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_provider_id")
                    .table(Orders::Table)
                    .col(Orders::ProviderId)
                    .to_owned(),
            )
            .await?;

        // Terminal gig statuses propagate to the order by gig_id.
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_gig_id")
                    .table(Orders::Table)
                    .col(Orders::GigId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}
