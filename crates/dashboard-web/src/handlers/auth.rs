//! Login, registration and logout

use crate::extractors::{CurrentSession, SessionToken};
use crate::pages;
use crate::session_cookie::{clear_cookie, set_cookie};
use crate::state::AppState;
use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use dashboard_client::{ClientError, Session};
use dashboard_core::{Credentials, Registration};
use http::{StatusCode, header};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Where a successful login lands
const AFTER_LOGIN: &str = "/dashboard";

/// Login form body
#[derive(Deserialize, Default)]
pub struct LoginForm {
    /// Username field
    #[serde(default)]
    pub username: String,
    /// Password field
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Registration form body
#[derive(Deserialize, Default)]
pub struct RegisterForm {
    /// Email field
    #[serde(default)]
    pub email: String,
    /// Password field
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Status and message for a failed form submission
fn form_error(err: &ClientError, fallback: &str) -> (StatusCode, String) {
    let status = match err {
        ClientError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
        ClientError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        ClientError::Status { status, .. } if (400..500).contains(status) => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
        }
        _ => StatusCode::BAD_GATEWAY,
    };
    let message = match err {
        ClientError::InvalidRequest { message } => message.clone(),
        ClientError::Unauthorized { message: None, .. } => {
            "Invalid username or password".to_string()
        }
        _ => err
            .server_message()
            .map_or_else(|| fallback.to_string(), str::to_string),
    };
    (status, message)
}

/// Login form; an authenticated visitor goes straight to the dashboard
pub async fn login_page(CurrentSession(session): CurrentSession) -> Response {
    if session.is_authenticated() {
        return Redirect::to(AFTER_LOGIN).into_response();
    }
    Html(pages::auth::login(None, "")).into_response()
}

/// Submit credentials. Only a login whose profile also loads sets the cookie.
pub async fn login(State(state): State<Arc<AppState>>, Form(form): Form<LoginForm>) -> Response {
    let credentials = Credentials::new(form.username.trim(), form.password);
    let mut session = Session::anonymous();

    let result = session.login(&state.api_client, &credentials).await;
    match (result, session.token()) {
        (Ok(()), Some(token)) => (
            [(header::SET_COOKIE, set_cookie(&state.config.session, token))],
            Redirect::to(AFTER_LOGIN),
        )
            .into_response(),
        (Ok(()), None) => (
            StatusCode::BAD_GATEWAY,
            Html(pages::auth::login(
                Some("Login failed. Please try again."),
                &credentials.username,
            )),
        )
            .into_response(),
        (Err(e), _) => {
            let (status, message) = form_error(&e, "Login failed. Please try again.");
            (
                status,
                Html(pages::auth::login(Some(&message), &credentials.username)),
            )
                .into_response()
        }
    }
}

/// Registration form
pub async fn register_page() -> Html<String> {
    Html(pages::auth::register(None, None, ""))
}

/// Submit a registration. The account still needs approval, so no session
/// is created.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegisterForm>,
) -> Response {
    let registration = Registration::new(form.email.trim(), form.password);
    match Session::register(&state.api_client, &registration).await {
        Ok(response) => Html(pages::auth::register(None, Some(&response.message), "")).into_response(),
        Err(e) => {
            let (status, message) = form_error(&e, "Registration failed. Please try again.");
            (
                status,
                Html(pages::auth::register(
                    Some(&message),
                    None,
                    &registration.email,
                )),
            )
                .into_response()
        }
    }
}

/// Drop the cookie and any cache held for the token
pub async fn logout(
    State(state): State<Arc<AppState>>,
    SessionToken(token): SessionToken,
) -> Response {
    if let Some(token) = &token {
        state.evict_user_list(token);
        info!("Session logged out");
    }
    (
        [(header::SET_COOKIE, clear_cookie(&state.config.session))],
        Redirect::to("/login"),
    )
        .into_response()
}
