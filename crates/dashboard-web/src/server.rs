//! Web server setup and configuration

use crate::{routes::build_routes, state::AppState};
use axum::Router;
use dashboard_client::ClientResult;
use dashboard_core::Config;
use std::sync::Arc;

/// Build the complete web application with all routes and state
///
/// # Errors
///
/// Returns an error if the HTTP clients cannot be built.
pub fn build_app(config: Config) -> ClientResult<Router> {
    let state = Arc::new(AppState::new(config)?);
    Ok(build_app_with_state(state))
}

/// Build the application around existing state
pub fn build_app_with_state(state: Arc<AppState>) -> Router {
    build_routes().with_state(state)
}
