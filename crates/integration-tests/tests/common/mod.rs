//! Shared setup for the API tests: an in-memory store wired into the real
//! routing table, plus register/login shortcuts.

#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};

use mb_api::{configure_routes, AppState};
use mb_auth_jwt::JwtAuthProvider;
use mb_core::{Role, User};
use mb_db_sqlite::SqliteStore;
use mb_notify_local::LocalNotifyRelay;

/// Satisfies the register-time password policy.
pub const PASSWORD: &str = "Sup3r-secret";

pub async fn test_state() -> web::Data<AppState> {
    let store = Arc::new(SqliteStore::in_memory().await.expect("in-memory schema"));
    let auth = Arc::new(JwtAuthProvider::new("integration-secret", 3600));
    let relay = Arc::new(LocalNotifyRelay::new());
    web::Data::new(AppState::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store,
        auth,
        relay,
    ))
}

pub async fn spawn_app(
    state: web::Data<AppState>,
) -> impl Service<Request, Response = ServiceResponse, Error = Error> {
    test::init_service(
        App::new()
            .app_data(state)
            .service(web::scope("/api").configure(configure_routes)),
    )
    .await
}

pub async fn register<S>(app: &S, username: &str) -> serde_json::Value
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let resp = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(serde_json::json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": PASSWORD,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201, "registration of {username} failed");
    test::read_body_json(resp).await
}

pub async fn login<S>(app: &S, username: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let resp = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "username": username,
                "password": PASSWORD,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200, "login of {username} failed");
    let body: serde_json::Value = test::read_body_json(resp).await;
    body["token"].as_str().expect("token in login body").to_string()
}

pub async fn register_and_login<S>(app: &S, username: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    register(app, username).await;
    login(app, username).await
}

/// Admins are never created through the public API; seed one directly.
pub async fn seed_admin(state: &web::Data<AppState>, username: &str) {
    let hash = state.auth.hash_password(PASSWORD).expect("hash");
    let mut user = User::new(
        username.to_string(),
        format!("{username}@example.com"),
        hash,
        None,
        None,
    )
    .expect("valid admin account");
    user.role = Role::Admin;
    state.users.create_user(&user).await.expect("admin insert");
}

pub fn authed(req: test::TestRequest, token: &str) -> test::TestRequest {
    req.insert_header(("Authorization", format!("Bearer {token}")))
}

pub async fn create_board<S>(app: &S, token: &str, title: &str) -> serde_json::Value
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let resp = test::call_service(
        app,
        authed(test::TestRequest::post().uri("/api/boards"), token)
            .set_json(serde_json::json!({
                "title": title,
                "imageUrl": "https://img.example.com/cover.png",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201, "creating board '{title}' failed");
    test::read_body_json(resp).await
}
