//! Request extractors for the session cookie

use crate::session_cookie::token_from_headers;
use crate::state::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use dashboard_client::Session;
use dashboard_core::BearerToken;
use http::request::Parts;
use std::convert::Infallible;
use std::sync::Arc;

/// Token from the cookie, unchecked
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<BearerToken>);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for SessionToken {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(token_from_headers(
            &parts.headers,
            &state.config.session.cookie_name,
        )))
    }
}

/// Session restored from the cookie via `auth/me`
///
/// A rejected token yields an anonymous session and drops any cache held for
/// it. The stale cookie itself is left alone; the next login overwrites it.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers, &state.config.session.cookie_name);
        let session = Session::restore(&state.api_client, token.clone()).await;
        if let Some(token) = &token
            && !session.is_authenticated()
        {
            state.evict_user_list(token);
        }
        Ok(Self(session))
    }
}
