//! Route definitions for the web interface

use crate::{
    handlers::{api, auth, market, pages, users},
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Build the complete web application router
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Public pages
        .route("/", get(pages::landing))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
        // Dashboard pages
        .route("/dashboard", get(market::market_page))
        .route("/dashboard/account", get(pages::account))
        .route("/dashboard/users", get(users::users_page))
        .route("/dashboard/users/:id/:decision", post(users::decide))
        .route("/dashboard/ai/chat", get(pages::chat))
        // JSON
        .route("/api/markets", get(api::api_markets))
        // Health check
        .route("/health", get(api::health_check))
        .fallback(pages::not_found)
}
