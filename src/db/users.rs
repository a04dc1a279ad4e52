use sea_orm::sea_query::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::users::{self, Signup, UpdateProfile};

/// Insert a new user. The caller hashes the password.
pub async fn insert_user(
    db: &DatabaseConnection,
    input: Signup,
    password_hash: String,
) -> Result<users::Model, DbErr> {
    let new_user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        email: Set(input.email),
        password_hash: Set(password_hash),
        college: Set(input.college),
        phone: Set(input.phone),
        picture: Set(None),
        rating: Set(0.0),
        rating_count: Set(0),
        terms_accepted: Set(input.terms_accepted),
        created_at: Set(chrono::Utc::now()),
    };

    new_user.insert(db).await
}

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Fetch a single user by email (login lookup).
pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
}

/// Partial profile update; only provided fields are touched.
pub async fn update_profile(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProfile,
) -> Result<users::Model, DbErr> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

    let mut active: users::ActiveModel = user.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(college) = input.college {
        active.college = Set(college);
    }
    if let Some(phone) = input.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(picture) = input.picture {
        active.picture = Set(Some(picture));
    }

    active.update(db).await
}

/// Overwrite a user's denormalized rating aggregate.
pub async fn update_rating_aggregate(
    db: &DatabaseConnection,
    id: Uuid,
    rating: f64,
    rating_count: i32,
) -> Result<(), DbErr> {
    users::Entity::update_many()
        .col_expr(users::Column::Rating, Expr::value(rating))
        .col_expr(users::Column::RatingCount, Expr::value(rating_count))
        .filter(users::Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(())
}
