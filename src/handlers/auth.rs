use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::jwt::create_token;
use crate::auth::middleware::{AuthenticatedUser, JwtSecret};
use crate::auth::password::{hash_password, verify_password};
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::users::{Login, Signup, UserResponse};

/// POST /api/auth/signup — register a new account and return a token.
pub async fn signup(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<Signup>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();

    if !input.terms_accepted {
        return Err(ApiError::Validation(
            "Must accept terms and conditions".to_string(),
        ));
    }

    if user_db::get_user_by_email(db.get_ref(), &input.email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| ApiError::Internal(format!("Could not hash password: {e}")))?;

    let user = user_db::insert_user(db.get_ref(), input, password_hash).await?;
    let token = create_token(user.id, &secret.0).map_err(ApiError::Internal)?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "token": token,
        "user": UserResponse::from(user),
    })))
}

/// POST /api/auth/login — exchange credentials for a token.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<Login>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();

    let user = user_db::get_user_by_email(db.get_ref(), &input.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    if !verify_password(&input.password, &user.password_hash) {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = create_token(user.id, &secret.0).map_err(ApiError::Internal)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "token": token,
        "user": UserResponse::from(user),
    })))
}

/// GET /api/auth/me — return the currently authenticated user's profile.
pub async fn me(user: AuthenticatedUser) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(UserResponse::from(user.0)))
}
