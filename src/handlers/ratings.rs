use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::ratings as rating_db;
use crate::engine;
use crate::error::ApiError;
use crate::models::ratings::CreateRating;

/// POST /api/ratings — rate the other party on a completed order.
pub async fn create_rating(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateRating>,
) -> Result<HttpResponse, ApiError> {
    let rating =
        engine::ratings::submit_rating(db.get_ref(), body.into_inner(), &user.0).await?;
    Ok(HttpResponse::Created().json(rating))
}

/// GET /api/ratings/user/{user_id} — ratings received by a user (public).
pub async fn get_user_ratings(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let ratings = rating_db::get_ratings_for_user(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ratings))
}
