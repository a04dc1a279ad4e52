use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `users` table.
///
/// `rating` and `rating_count` are denormalized aggregates maintained by the
/// rating engine; they are recomputed from the full rating history on every
/// new rating.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub college: String,
    pub phone: Option<String>,
    pub picture: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub rating_count: i32,
    pub terms_accepted: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for POST /api/auth/signup.
#[derive(Debug, Clone, Deserialize)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub college: String,
    pub phone: Option<String>,
    pub terms_accepted: bool,
}

/// Request body for POST /api/auth/login.
#[derive(Debug, Clone, Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

/// Request body for PUT /api/users/profile. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub college: Option<String>,
    pub phone: Option<String>,
    pub picture: Option<String>,
}

/// A safe user representation for API responses (never leaks the hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub college: String,
    pub phone: Option<String>,
    pub picture: Option<String>,
    pub rating: f64,
    pub rating_count: i32,
    pub terms_accepted: bool,
    pub created_at: DateTimeUtc,
}

impl From<Model> for UserResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            college: m.college,
            phone: m.phone,
            picture: m.picture,
            rating: m.rating,
            rating_count: m.rating_count,
            terms_accepted: m.terms_accepted,
            created_at: m.created_at,
        }
    }
}
