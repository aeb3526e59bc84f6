//! Market table page handler

use crate::extractors::CurrentSession;
use crate::fetch::load_markets;
use crate::pages;
use crate::query::TableQuery;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::response::Html;
use dashboard_core::MarketAsset;
use std::sync::Arc;

/// Market table; `refresh` in the query forces a refetch
pub async fn market_page(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<TableQuery>,
) -> Html<String> {
    let loaded = load_markets(&state, query.wants_refresh()).await;
    let table_state = query.to_state::<MarketAsset>(&state.config.table);
    Html(pages::market::render(
        &session,
        &loaded,
        &table_state,
        &state.config.table,
    ))
}
