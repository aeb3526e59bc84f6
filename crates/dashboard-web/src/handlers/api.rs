//! JSON and health endpoints

use crate::fetch::{Loaded, load_markets};
use crate::query::TableQuery;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Json, Response};
use dashboard_core::MarketAsset;
use dashboard_core::table::derive;
use http::{StatusCode, header};
use std::sync::Arc;

/// Derived market view as JSON, driven by the same query parameters as the
/// market page
pub async fn api_markets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TableQuery>,
) -> Response {
    match load_markets(&state, query.wants_refresh()).await {
        Loaded::Loading => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::RETRY_AFTER, "2")],
            Json(serde_json::json!({ "status": "loading" })),
        )
            .into_response(),
        Loaded::Failed => (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({ "error": "Failed to load market data" })),
        )
            .into_response(),
        Loaded::Ready { data, outdated } => {
            let table_state = query.to_state::<MarketAsset>(&state.config.table);
            let view = derive(data.as_slice(), &table_state);
            Json(serde_json::json!({
                "meta": view.meta(),
                "outdated": outdated,
                "rows": view.rows,
            }))
            .into_response()
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}
