use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::gigs as gig_db;
use crate::engine;
use crate::error::ApiError;
use crate::models::gigs::{CreateGig, GigListQuery, UpdateGigStatus};

/// GET /api/gigs — list gigs, optionally filtered by ?status= (public).
pub async fn get_gigs(
    db: web::Data<DatabaseConnection>,
    query: web::Query<GigListQuery>,
) -> Result<HttpResponse, ApiError> {
    let gigs = gig_db::get_gigs(db.get_ref(), query.status.as_deref()).await?;
    Ok(HttpResponse::Ok().json(gigs))
}

/// GET /api/gigs/{id} — get a single gig (public).
pub async fn get_gig(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let gig = gig_db::get_gig_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Gig {id}")))?;

    Ok(HttpResponse::Ok().json(gig))
}

/// POST /api/gigs — post a new gig, open for acceptance.
pub async fn create_gig(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateGig>,
) -> Result<HttpResponse, ApiError> {
    let gig =
        gig_db::insert_gig(db.get_ref(), body.into_inner(), user.0.id, user.0.name).await?;
    Ok(HttpResponse::Created().json(gig))
}

/// POST /api/gigs/{id}/accept — accept an open gig, creating an order.
pub async fn accept_gig(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let order = engine::orders::accept_gig(db.get_ref(), path.into_inner(), &user.0).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Gig accepted",
        "order_id": order.id,
    })))
}

/// PUT /api/gigs/{id}/status — poster or acceptor updates the gig status.
pub async fn update_gig_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateGigStatus>,
) -> Result<HttpResponse, ApiError> {
    let gig = engine::orders::update_gig_status(
        db.get_ref(),
        path.into_inner(),
        &body.status,
        &user.0,
    )
    .await?;
    Ok(HttpResponse::Ok().json(gig))
}

/// GET /api/gigs/my/posted — gigs the authenticated user posted.
pub async fn get_my_posted_gigs(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let gigs = gig_db::get_gigs_by_poster(db.get_ref(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(gigs))
}

/// GET /api/gigs/my/accepted — gigs the authenticated user accepted.
pub async fn get_my_accepted_gigs(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let gigs = gig_db::get_gigs_by_acceptor(db.get_ref(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(gigs))
}
