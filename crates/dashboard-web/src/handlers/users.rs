//! User list and approval handlers

use crate::extractors::{CurrentSession, SessionToken};
use crate::fetch::load_users;
use crate::pages;
use crate::query::TableQuery;
use crate::state::AppState;
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use dashboard_core::users::apply_decision;
use dashboard_core::{Decision, User};
use http::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Body of the approve/reject forms
#[derive(Debug, Default, Deserialize)]
pub struct DecisionForm {
    /// Users page URL to go back to, including its query
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Users table
pub async fn users_page(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<TableQuery>,
) -> Html<String> {
    let Some(token) = session.token() else {
        debug!("Users page requested without a session");
        return Html(pages::users::render_signed_out(&session));
    };
    let loaded = load_users(&state, token, query.wants_refresh()).await;
    let table_state = query.to_state::<User>(&state.config.table);
    Html(pages::users::render(
        &session,
        &loaded,
        &table_state,
        query.status_filter(),
        &state.config.table,
    ))
}

/// Approve or reject an account, then patch the cached list in place.
///
/// A failed call is logged and otherwise ignored; the list is left as it was.
pub async fn decide(
    State(state): State<Arc<AppState>>,
    SessionToken(token): SessionToken,
    Path((id, decision)): Path<(String, String)>,
    Form(form): Form<DecisionForm>,
) -> Response {
    let Ok(decision) = decision.parse::<Decision>() else {
        return (StatusCode::NOT_FOUND, Html(pages::not_found::render())).into_response();
    };

    match state.api_client.decide(token.as_ref(), &id, decision).await {
        Ok(()) => {
            info!(user_id = %id, %decision, "User decision applied");
            let patched = token
                .as_ref()
                .and_then(|token| state.existing_user_list(token))
                .is_some_and(|list| list.update(|users| apply_decision(users, &id, decision)));
            if !patched {
                warn!(user_id = %id, "No cached user list to patch");
            }
        }
        Err(e) => {
            warn!(user_id = %id, %decision, error = %e, "User decision failed");
        }
    }

    Redirect::to(&return_target(form.return_to.as_deref())).into_response()
}

/// Only same-site users page URLs are followed
fn return_target(requested: Option<&str>) -> String {
    let path = pages::users::PATH;
    requested
        .filter(|target| {
            target
                .strip_prefix(path)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('?'))
                && !target.contains(['\\', '\r', '\n'])
        })
        .unwrap_or(path)
        .to_string()
}
