use sea_orm::*;
use uuid::Uuid;

use crate::models::ratings::{self, CreateRating};

/// Insert a new rating row. The unique index on (order_id, from_user_id)
/// rejects a duplicate that slips past the existence check.
pub async fn insert_rating(
    db: &DatabaseConnection,
    input: CreateRating,
    from_user_id: Uuid,
    from_user_name: String,
    to_user_name: String,
) -> Result<ratings::Model, DbErr> {
    let new_rating = ratings::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_id: Set(input.order_id),
        from_user_id: Set(from_user_id),
        from_user_name: Set(from_user_name),
        to_user_id: Set(input.to_user_id),
        to_user_name: Set(to_user_name),
        rating: Set(input.rating),
        review: Set(input.review),
        created_at: Set(chrono::Utc::now()),
    };

    new_rating.insert(db).await
}

/// Whether `from_user_id` has already rated this order.
pub async fn exists_for_order_and_rater(
    db: &DatabaseConnection,
    order_id: Uuid,
    from_user_id: Uuid,
) -> Result<bool, DbErr> {
    let found = ratings::Entity::find()
        .filter(ratings::Column::OrderId.eq(order_id))
        .filter(ratings::Column::FromUserId.eq(from_user_id))
        .one(db)
        .await?;
    Ok(found.is_some())
}

/// All ratings received by a user. Feeds the aggregate recomputation.
pub async fn get_ratings_for_user(
    db: &DatabaseConnection,
    to_user_id: Uuid,
) -> Result<Vec<ratings::Model>, DbErr> {
    ratings::Entity::find()
        .filter(ratings::Column::ToUserId.eq(to_user_id))
        .order_by_desc(ratings::Column::CreatedAt)
        .all(db)
        .await
}
