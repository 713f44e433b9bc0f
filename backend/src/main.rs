//! Main entry point for the CleanAir Portal backend.
//!
//! This file initializes the Axum web server, sets up the database pool and
//! shared services, and registers all API routes and middleware.
//! It orchestrates the application's startup and defines its overall structure.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use crate::api::common::ApiResponse;
use crate::auth::session_store::SessionStore;
use crate::services::commerce::CommerceClient;
use crate::services::email_service::EmailService;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() {
    init();

    let config = Config::from_env().unwrap();
    let db = Database::new(&config).await.unwrap();
    let pool = db.pool().clone();

    let commerce = CommerceClient::new(&config.commerce);
    let email_service = Arc::new(EmailService::new(config.email.clone()).unwrap());
    // Refresh sessions live exactly as long as the refresh token itself.
    let session_store = SessionStore::new(Duration::from_secs(
        config.refresh_expires_in_days * 24 * 60 * 60,
    ));

    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/products", api::products::routes::product_router())
        .nest("/orders", api::orders::routes::order_router())
        .nest(
            "/admin",
            auth::routes::auth_router().merge(api::users::routes::user_router()),
        )
        .nest("/activity", api::activity::routes::activity_router())
        .layer(Extension(pool))
        .layer(Extension(commerce))
        .layer(Extension(email_service))
        .layer(Extension(session_store));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    info!(
        "Starting CleanAir Portal server on port {}",
        config.server_port
    );
    axum::serve(listener, app).await.unwrap();
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "CleanAir Portal Backend",
            "version": "0.1.0"
        }),
        "Welcome to the CleanAir Portal API",
    ))
}
