//! # Moodboard Binary
//!
//! The entry point that assembles the application based on compile-time
//! features and runtime configuration.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use mb_api::{configure_routes, middleware, AppState};

#[cfg(feature = "db-sqlite")]
use mb_db_sqlite::SqliteStore;

#[cfg(feature = "auth-jwt")]
use mb_auth_jwt::JwtAuthProvider;

#[cfg(feature = "notify-local")]
use mb_notify_local::LocalNotifyRelay;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = mb_configs::load()?;

    // 1. Storage implementation
    #[cfg(feature = "db-sqlite")]
    let store = Arc::new(SqliteStore::connect(&config.database.url).await?);

    // 2. Auth implementation
    #[cfg(feature = "auth-jwt")]
    let auth = Arc::new(JwtAuthProvider::new(
        config.auth.jwt_secret.expose_secret(),
        config.auth.token_ttl_secs,
    ));

    // 3. Notification implementation
    #[cfg(feature = "notify-local")]
    let relay = Arc::new(LocalNotifyRelay::new());

    let state = web::Data::new(AppState::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        auth,
        relay,
    ));

    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        "moodboard starting"
    );

    let cors_origin = config.http.cors_origin.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::standard_middleware())
            .wrap(middleware::cors_policy(cors_origin.as_deref()))
            .service(web::scope("/api").configure(configure_routes))
    })
    .bind((config.http.host.as_str(), config.http.port))?
    .run()
    .await?;

    store.close().await;
    Ok(())
}
