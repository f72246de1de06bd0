//! # mb-api
//!
//! The web routing and orchestration layer for the mood board service.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod state;

use actix_web::web;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Configures the routes for the mood board API.
///
/// Everything lives under one scope so the main binary can mount the API
/// wherever it wants (we mount it at `/api`).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .route("/auth/register", web::post().to(handlers::auth::register))
            .route("/auth/login", web::post().to(handlers::auth::login))
            .route("/users", web::get().to(handlers::users::list_users))
            .route("/users/{id}", web::get().to(handlers::users::get_user))
            .route("/users/{id}/follow", web::post().to(handlers::social::follow_user))
            .route("/users/{id}/follow", web::delete().to(handlers::social::unfollow_user))
            .route("/boards", web::get().to(handlers::boards::list_boards))
            .route("/boards", web::post().to(handlers::boards::create_board))
            .route("/boards/{id}", web::get().to(handlers::boards::get_board))
            .route("/boards/{id}", web::patch().to(handlers::boards::update_board))
            .route("/boards/{id}", web::delete().to(handlers::boards::delete_board))
            .route("/boards/{id}/likes", web::post().to(handlers::social::like_board))
            .route("/boards/{id}/likes", web::delete().to(handlers::social::unlike_board))
            .route("/boards/{id}/comments", web::get().to(handlers::boards::board_comments))
            .route("/boards/{id}/comments", web::post().to(handlers::social::create_comment))
            .route("/boards/{id}/elements", web::get().to(handlers::boards::board_elements))
            .route("/boards/{id}/elements", web::post().to(handlers::elements::create_element))
            .route("/comments/{id}", web::delete().to(handlers::social::delete_comment))
            .route("/elements/{id}", web::patch().to(handlers::elements::update_element))
            .route("/elements/{id}", web::delete().to(handlers::elements::delete_element))
            .route("/labels", web::get().to(handlers::labels::list_labels))
            .route("/labels", web::post().to(handlers::labels::create_label))
            .route("/labels/{id}", web::delete().to(handlers::labels::delete_label)),
    );
}
