use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order status stored as a lowercase string in the database.
///
/// `Completed` and `Cancelled` are terminal; no transition leaves them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Status {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Which kind of listing the order was created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum OrderType {
    #[sea_orm(string_value = "gig")]
    Gig,
    #[sea_orm(string_value = "service")]
    Service,
}

/// SeaORM entity for the `orders` table.
///
/// Exactly one of `gig_id` / `service_id` is set, matching `order_type`.
/// `total_amount` is a snapshot of the listing price at creation and
/// `commission` is frozen at 15% of it; later listing price edits never
/// touch either. Orders are never deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_type: OrderType,
    pub gig_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub buyer_id: Uuid,
    pub buyer_name: String,
    pub provider_id: Uuid,
    pub provider_name: String,
    #[sea_orm(column_type = "Double")]
    pub total_amount: f64,
    #[sea_orm(column_type = "Double")]
    pub commission: f64,
    pub status: Status,
    pub created_at: DateTimeUtc,
    pub cancelled_at: Option<DateTimeUtc>,
}

impl Model {
    /// Whether `user_id` is the buyer or the provider on this order.
    pub fn is_party(&self, user_id: Uuid) -> bool {
        self.buyer_id == user_id || self.provider_id == user_id
    }

    /// The other party on the order, from `user_id`'s point of view.
    pub fn counterparty(&self, user_id: Uuid) -> Uuid {
        if self.buyer_id == user_id {
            self.provider_id
        } else {
            self.buyer_id
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gigs::Entity",
        from = "Column::GigId",
        to = "super::gigs::Column::Id"
    )]
    Gig,
    #[sea_orm(
        belongs_to = "super::services::Entity",
        from = "Column::ServiceId",
        to = "super::services::Column::Id"
    )]
    Service,
    #[sea_orm(has_many = "super::ratings::Entity")]
    Ratings,
}

impl Related<super::gigs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gig.def()
    }
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl Related<super::ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Everything the order engine computes before inserting a new order.
/// Status, id and created_at are filled in at insert time.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_type: OrderType,
    pub gig_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub buyer_id: Uuid,
    pub buyer_name: String,
    pub provider_id: Uuid,
    pub provider_name: String,
    pub total_amount: f64,
    pub commission: f64,
}
