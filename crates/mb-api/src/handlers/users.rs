//! User directory reads. Password hashes never leave the model layer; the
//! serializer skips them.

use actix_web::{web, HttpResponse};

use mb_core::{parse_id, AppError};

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::state::AppState;

pub async fn list_users(
    state: web::Data<AppState>,
    _user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let users = state.users.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    _user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    match state.users.find_user(id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(AppError::NotFound("user".to_string(), id.to_string()).into()),
    }
}
