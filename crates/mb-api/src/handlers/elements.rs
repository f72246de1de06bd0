//! Element placement on boards. Only the board owner may add or remove
//! elements; reads go through the board handlers.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use mb_core::{parse_id, AppError, Element, ElementGeometry, ElementKind, ElementPatch};

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateElementRequest {
    pub kind: String,
    pub content_url: Option<String>,
    pub text_content: Option<String>,
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: Option<f64>,
    pub z_index: Option<i64>,
}

pub async fn create_element(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CreateElementRequest>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let board_id = parse_id(&path)?;
    if state.boards.find_board(board_id).await?.is_none() {
        return Err(AppError::NotFound("board".to_string(), board_id.to_string()).into());
    }
    state.authz.authorize_element_mutation(board_id, &user.0).await?;

    let body = body.into_inner();
    let kind: ElementKind = body.kind.parse()?;
    let geometry = ElementGeometry {
        position_x: body.position_x,
        position_y: body.position_y,
        width: body.width,
        height: body.height,
    };
    let element = Element::new(
        board_id,
        kind,
        body.content_url,
        body.text_content,
        geometry,
        body.rotation,
        body.z_index,
    )?;
    state.boards.create_element(&element).await?;
    Ok(HttpResponse::Created().json(element))
}

pub async fn update_element(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ElementPatch>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let Some(element) = state.boards.find_element(id).await? else {
        return Err(AppError::NotFound("element".to_string(), id.to_string()).into());
    };
    state
        .authz
        .authorize_element_mutation(element.board_id, &user.0)
        .await?;
    let patch = body.into_inner();
    patch.validate()?;
    let updated = state
        .boards
        .update_element(id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("element".to_string(), id.to_string()))?;
    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_element(
    state: web::Data<AppState>,
    path: web::Path<String>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let Some(element) = state.boards.find_element(id).await? else {
        return Err(AppError::NotFound("element".to_string(), id.to_string()).into());
    };
    state
        .authz
        .authorize_element_mutation(element.board_id, &user.0)
        .await?;
    state.boards.delete_element(id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": id })))
}
