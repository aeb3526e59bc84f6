//! Handlers for the static pages

use crate::extractors::CurrentSession;
use crate::pages;
use axum::response::{Html, IntoResponse};
use http::StatusCode;

/// Landing page
pub async fn landing(CurrentSession(session): CurrentSession) -> Html<String> {
    Html(pages::landing::render(&session))
}

/// Account profile page
pub async fn account(CurrentSession(session): CurrentSession) -> Html<String> {
    Html(pages::account::render(&session))
}

/// Chat page
pub async fn chat(CurrentSession(session): CurrentSession) -> Html<String> {
    Html(pages::chat::render(&session))
}

/// Fallback for unknown paths
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(pages::not_found::render()))
}
