use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::orders as order_db;
use crate::engine;
use crate::error::ApiError;

/// GET /api/orders — orders where the authenticated user is a party.
pub async fn get_orders(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let orders = order_db::get_orders_for_user(db.get_ref(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(orders))
}

/// GET /api/orders/{id} — single order, parties only.
pub async fn get_order(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let order = order_db::get_order_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order {id}")))?;

    if !order.is_party(user.0.id) {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }

    Ok(HttpResponse::Ok().json(order))
}

/// POST /api/orders/{id}/cancel — cancel an active order; the response
/// carries the (informational) cancellation fee.
pub async fn cancel_order(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let fee = engine::orders::cancel_order(db.get_ref(), path.into_inner(), &user.0).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Order cancelled",
        "cancellation_fee": fee,
    })))
}

/// POST /api/orders/{id}/complete — mark a service order completed.
pub async fn complete_order(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let order =
        engine::orders::complete_service_order(db.get_ref(), path.into_inner(), &user.0).await?;
    Ok(HttpResponse::Ok().json(order))
}
