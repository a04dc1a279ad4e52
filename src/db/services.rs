use sea_orm::sea_query::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::services::{self, CreateService};

/// Insert a new service.
pub async fn insert_service(
    db: &DatabaseConnection,
    input: CreateService,
    creator_id: Uuid,
    creator_name: String,
) -> Result<services::Model, DbErr> {
    let new_service = services::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        description: Set(input.description),
        price: Set(input.price),
        creator_id: Set(creator_id),
        creator_name: Set(creator_name),
        rating: Set(0.0),
        rating_count: Set(0),
        created_at: Set(chrono::Utc::now()),
    };

    new_service.insert(db).await
}

/// Fetch all services, newest first.
pub async fn get_all_services(db: &DatabaseConnection) -> Result<Vec<services::Model>, DbErr> {
    services::Entity::find()
        .order_by_desc(services::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single service by ID.
pub async fn get_service_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<services::Model>, DbErr> {
    services::Entity::find_by_id(id).one(db).await
}

/// Services created by a user, newest first.
pub async fn get_services_by_creator(
    db: &DatabaseConnection,
    creator_id: Uuid,
) -> Result<Vec<services::Model>, DbErr> {
    services::Entity::find()
        .filter(services::Column::CreatorId.eq(creator_id))
        .order_by_desc(services::Column::CreatedAt)
        .all(db)
        .await
}

/// Overwrite a service's denormalized rating aggregate.
pub async fn update_rating_aggregate(
    db: &DatabaseConnection,
    id: Uuid,
    rating: f64,
    rating_count: i32,
) -> Result<(), DbErr> {
    services::Entity::update_many()
        .col_expr(services::Column::Rating, Expr::value(rating))
        .col_expr(services::Column::RatingCount, Expr::value(rating_count))
        .filter(services::Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(())
}
