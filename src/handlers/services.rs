use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::services as service_db;
use crate::engine;
use crate::error::ApiError;
use crate::models::services::CreateService;

/// GET /api/services — list all services (public).
pub async fn get_services(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, ApiError> {
    let services = service_db::get_all_services(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(services))
}

/// GET /api/services/{id} — get a single service (public).
pub async fn get_service(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let service = service_db::get_service_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Service {id}")))?;

    Ok(HttpResponse::Ok().json(service))
}

/// POST /api/services — offer a new service.
pub async fn create_service(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateService>,
) -> Result<HttpResponse, ApiError> {
    let service =
        service_db::insert_service(db.get_ref(), body.into_inner(), user.0.id, user.0.name)
            .await?;
    Ok(HttpResponse::Created().json(service))
}

/// POST /api/services/{id}/book — book a service, creating an order.
pub async fn book_service(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let order = engine::orders::book_service(db.get_ref(), path.into_inner(), &user.0).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Service booked",
        "order_id": order.id,
    })))
}

/// GET /api/services/my/created — services the authenticated user offers.
pub async fn get_my_services(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let services = service_db::get_services_by_creator(db.get_ref(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(services))
}
