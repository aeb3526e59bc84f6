//! Landing page

use crate::html::Layout;
use dashboard_client::Session;
use leptos::prelude::*;

/// Welcome text with entry links
#[must_use]
pub fn render(session: &Session) -> String {
    let actions = match session.user() {
        Some(user) => {
            let welcome = format!("Welcome back, {}.", user.username);
            view! {
                <p>{welcome}</p>
                <a class="btn btn-primary" href="/dashboard">"Go to Dashboard"</a>
            }
            .into_any()
        }
        None => view! {
            <a class="btn btn-primary" href="/login">"Login"</a>
            <a class="btn" href="/register">"Register"</a>
        }
        .into_any(),
    };
    Layout::new("Welcome", "/", session).without_menu().render(view! {
        <section class="hero">
            <h2>"Admin Dashboard"</h2>
            <p>"Approve new accounts and follow the cryptocurrency market."</p>
            {actions}
        </section>
    })
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use dashboard_core::{BearerToken, UserProfile};

    #[test]
    fn test_anonymous_landing_links_to_login() {
        let html = render(&Session::anonymous());
        assert!(html.contains("href=\"/login\""));
        assert!(html.contains("href=\"/register\""));
        assert!(!html.contains("class=\"sidebar\""));
    }

    #[test]
    fn test_authenticated_landing_links_to_dashboard() {
        let mut session = Session::checking(BearerToken::new("t").unwrap());
        session.resolve(Ok(UserProfile {
            id: "1".to_string(),
            email: "a@example.com".to_string(),
            username: "alice".to_string(),
            role: "user".to_string(),
            status: "approved".to_string(),
        }));
        let html = render(&session);
        assert!(html.contains("<p>Welcome back, alice.</p>"));
        assert!(html.contains("href=\"/dashboard\""));
    }
}
