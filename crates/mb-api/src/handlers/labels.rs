//! Label catalogue administration. The catalogue is global and admin-owned;
//! regular users only attach existing labels through board creation.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use mb_core::{parse_id, AppError, Label};
use mb_services::OwnershipAuthorizer;

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateLabelRequest {
    pub name: String,
}

pub async fn list_labels(
    state: web::Data<AppState>,
    _user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let labels = state.labels.list_labels().await?;
    Ok(HttpResponse::Ok().json(labels))
}

pub async fn create_label(
    state: web::Data<AppState>,
    body: web::Json<CreateLabelRequest>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    OwnershipAuthorizer::require_admin(&user.0)?;
    let name = body.into_inner().name;
    if state.labels.find_label_by_name(&name).await?.is_some() {
        return Err(AppError::Conflict(format!("label '{name}' already exists")).into());
    }
    let label = Label::new(name)?;
    state.labels.create_label(&label).await?;
    tracing::info!(label = %label.name, "label created");
    Ok(HttpResponse::Created().json(label))
}

pub async fn delete_label(
    state: web::Data<AppState>,
    path: web::Path<String>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    OwnershipAuthorizer::require_admin(&user.0)?;
    let id = parse_id(&path)?;
    state.label_resolver.delete_label(id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": id })))
}
