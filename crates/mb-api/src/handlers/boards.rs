//! Board CRUD and the paginated feed. Reads go through the paginator and
//! aggregator; mutations pass the ownership rules first. Note the
//! asymmetry: update is owner-only while delete also admits admins.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use mb_core::{parse_id, AppError, Board, BoardPatch};
use mb_services::ListBoardsRequest;

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBoardsQuery {
    pub limit: Option<i64>,
    pub cursor: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardRequest {
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub is_public: Option<bool>,
    /// Label names, resolved and linked best-effort after the board exists.
    #[serde(default)]
    pub labels: Vec<String>,
}

pub async fn list_boards(
    state: web::Data<AppState>,
    query: web::Query<ListBoardsQuery>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    let page = state
        .feed
        .list_boards(
            ListBoardsRequest {
                owner_id: query.user_id,
                limit: query.limit,
                cursor: query.cursor,
            },
            Some(user.0.id),
        )
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn get_board(
    state: web::Data<AppState>,
    path: web::Path<String>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let enriched = state.aggregator.enrich(Some(&[id]), Some(user.0.id)).await?;
    match enriched.into_iter().next() {
        Some(board) => Ok(HttpResponse::Ok().json(board)),
        None => Err(AppError::NotFound("board".to_string(), id.to_string()).into()),
    }
}

pub async fn create_board(
    state: web::Data<AppState>,
    body: web::Json<CreateBoardRequest>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let board = Board::new(
        user.0.id,
        body.title,
        body.description,
        body.image_url,
        body.is_public,
    )?;
    state.boards.create_board(&board).await?;

    if !body.labels.is_empty() {
        let label_ids = state.label_resolver.resolve_or_create(&body.labels).await?;
        let outcomes = state.label_resolver.link_all(board.id, &label_ids).await;
        let failed = outcomes.iter().filter(|o| !o.is_linked()).count();
        if failed > 0 {
            // board creation never fails because a label was already linked
            tracing::warn!(board_id = %board.id, failed, "some label links were not created");
        }
    }

    Ok(HttpResponse::Created().json(board))
}

pub async fn update_board(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<BoardPatch>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    if state.boards.find_board(id).await?.is_none() {
        return Err(AppError::NotFound("board".to_string(), id.to_string()).into());
    }
    state.authz.authorize_board_update(id, &user.0).await?;
    let patch = body.into_inner();
    patch.validate()?;
    let updated = state
        .boards
        .update_board(id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("board".to_string(), id.to_string()))?;
    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_board(
    state: web::Data<AppState>,
    path: web::Path<String>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let Some(board) = state.boards.find_board(id).await? else {
        return Err(AppError::NotFound("board".to_string(), id.to_string()).into());
    };
    state.authz.authorize_board_delete(id, &user.0).await?;
    state.boards.delete_board(id).await?;
    tracing::info!(board_id = %id, by = %user.0.username, "board deleted");
    Ok(HttpResponse::Ok().json(board))
}

pub async fn board_comments(
    state: web::Data<AppState>,
    path: web::Path<String>,
    _user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let comments = state.social.comments_for_board(id).await?;
    let decorated = state.comment_authors.with_authors(comments).await?;
    Ok(HttpResponse::Ok().json(decorated))
}

pub async fn board_elements(
    state: web::Data<AppState>,
    path: web::Path<String>,
    _user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let elements = state.boards.elements_for_board(id).await?;
    Ok(HttpResponse::Ok().json(elements))
}
