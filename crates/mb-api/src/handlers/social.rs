//! Likes, comments, and follows. Likes trigger a fire-and-forget
//! notification to the board owner's live sessions; the HTTP response never
//! waits on delivery.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use mb_core::{parse_id, AppError, BoardLike, Comment, Follow};

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
    pub parent_comment_id: Option<String>,
}

pub async fn like_board(
    state: web::Data<AppState>,
    path: web::Path<String>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let board_id = parse_id(&path)?;
    let Some(board) = state.boards.find_board(board_id).await? else {
        return Err(AppError::NotFound("board".to_string(), board_id.to_string()).into());
    };

    let like = BoardLike::new(user.0.id, board_id);
    state.social.create_like(&like).await?;

    if let Some(owner) = state.users.find_user(board.owner_id).await? {
        let relay = state.relay.clone();
        let from = user.0.username.clone();
        actix_web::rt::spawn(async move {
            relay.notify_like(&from, &owner.username).await;
        });
    }

    Ok(HttpResponse::Created().json(like))
}

pub async fn unlike_board(
    state: web::Data<AppState>,
    path: web::Path<String>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let board_id = parse_id(&path)?;
    if !state.social.delete_like(user.0.id, board_id).await? {
        return Err(AppError::NotFound("like".to_string(), board_id.to_string()).into());
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({ "unliked": board_id })))
}

pub async fn create_comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CreateCommentRequest>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let board_id = parse_id(&path)?;
    if state.boards.find_board(board_id).await?.is_none() {
        return Err(AppError::NotFound("board".to_string(), board_id.to_string()).into());
    }

    let body = body.into_inner();
    let parent_comment_id = body
        .parent_comment_id
        .as_deref()
        .map(parse_id)
        .transpose()?;
    let comment = Comment::new(user.0.id, board_id, parent_comment_id, body.content)?;
    state.social.create_comment(&comment).await?;

    let decorated = state.comment_authors.with_author(comment).await?;
    Ok(HttpResponse::Created().json(decorated))
}

pub async fn delete_comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let Some(comment) = state.social.find_comment(id).await? else {
        return Err(AppError::NotFound("comment".to_string(), id.to_string()).into());
    };
    state.authz.authorize_comment_delete(&comment, &user.0).await?;
    state.social.delete_comment(id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": id })))
}

pub async fn follow_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let followed_id = parse_id(&path)?;
    if followed_id == user.0.id {
        return Err(AppError::ValidationError("users cannot follow themselves".to_string()).into());
    }
    if state.users.find_user(followed_id).await?.is_none() {
        return Err(AppError::NotFound("user".to_string(), followed_id.to_string()).into());
    }
    let follow = Follow::new(user.0.id, followed_id);
    state.social.create_follow(&follow).await?;
    Ok(HttpResponse::Created().json(follow))
}

pub async fn unfollow_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let followed_id = parse_id(&path)?;
    if !state.social.delete_follow(user.0.id, followed_id).await? {
        return Err(AppError::NotFound("follow".to_string(), followed_id.to_string()).into());
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({ "unfollowed": followed_id })))
}
