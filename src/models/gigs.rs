use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Well-known gig status values.
///
/// The column is a plain string rather than an enum: the status update
/// endpoint writes whatever the caller sends, a looseness inherited from the
/// legacy API that clients depend on.
pub mod status {
    pub const OPEN: &str = "open";
    pub const ACCEPTED: &str = "accepted";
    pub const COMPLETED: &str = "completed";
    pub const CANCELLED: &str = "cancelled";
}

/// SeaORM entity for the `gigs` table.
///
/// Invariant: `acceptor_id` is set if and only if status is not `open`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gigs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub status: String,
    pub poster_id: Uuid,
    pub poster_name: String,
    pub acceptor_id: Option<Uuid>,
    pub acceptor_name: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PosterId",
        to = "super::users::Column::Id"
    )]
    Poster,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Poster.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGig {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
}

/// Request body for PUT /api/gigs/{id}/status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGigStatus {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GigListQuery {
    pub status: Option<String>,
}
