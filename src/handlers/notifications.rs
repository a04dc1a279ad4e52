use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::notifications as notification_db;
use crate::error::ApiError;

/// GET /api/notifications — the authenticated user's notifications.
pub async fn get_notifications(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let notifications =
        notification_db::get_notifications_for_user(db.get_ref(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

/// POST /api/notifications/{id}/read — mark one of your notifications read.
pub async fn mark_read(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let notification = notification_db::get_notification_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Notification {id}")))?;

    if notification.user_id != user.0.id {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }

    notification_db::mark_read(db.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Notification marked as read",
    })))
}
