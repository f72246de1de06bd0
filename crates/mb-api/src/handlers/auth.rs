//! Registration and login. Password policy is checked before hashing;
//! duplicate username/email surfaces as a 409 from the store's uniqueness
//! constraints.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use mb_core::{AppError, User};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    User::check_password_policy(&body.password)?;
    let password_hash = state.auth.hash_password(&body.password)?;
    let user = User::new(body.username, body.email, password_hash, body.avatar_url, body.bio)?;
    state.users.create_user(&user).await?;
    tracing::info!(username = %user.username, "user registered");
    Ok(HttpResponse::Created().json(user))
}

pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users
        .find_user_by_username(&body.username)
        .await?
        .filter(|user| state.auth.verify_password(&body.password, &user.password_hash))
        .ok_or_else(|| AppError::Unauthorized("invalid credentials".to_string()))?;

    let token = state.auth.issue_token(&user)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "token": token })))
}
