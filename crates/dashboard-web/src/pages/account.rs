//! Account profile page

use crate::html::Layout;
use dashboard_client::Session;
use dashboard_core::utils::capitalize;
use dashboard_core::{Role, UserProfile, UserStatus};
use leptos::prelude::*;

/// Path of the account page
pub const PATH: &str = "/dashboard/account";

fn role_class(role: Role) -> &'static str {
    match role {
        Role::Admin => "badge badge-rejected",
        Role::Owner => "badge badge-pending",
        Role::User | Role::Other => "badge badge-approved",
    }
}

fn status_class(status: &str) -> &'static str {
    match status.parse::<UserStatus>() {
        Ok(UserStatus::Approved) => "badge badge-approved",
        Ok(UserStatus::Rejected) => "badge badge-rejected",
        Ok(UserStatus::Pending) | Err(_) => "badge badge-pending",
    }
}

/// Profile card, or a prompt to log in
#[must_use]
pub fn render(session: &Session) -> String {
    let layout = Layout::new("Account", PATH, session);
    match session.user() {
        Some(profile) => layout.render(view! { <ProfileCard profile={profile.clone()}/> }),
        None => layout.render(view! {
            <div class="card">
                <p>
                    "No profile information available. Please "
                    <a href="/login">"login"</a>
                    "."
                </p>
            </div>
        }),
    }
}

#[component]
fn ProfileCard(profile: UserProfile) -> impl IntoView {
    let role_class = role_class(profile.role_kind());
    let status_class = status_class(&profile.status);
    let role = capitalize(&profile.role);
    let status = capitalize(&profile.status);
    view! {
        <div class="card profile">
            <h2>"Profile"</h2>
            <dl>
                <dt>"ID"</dt>
                <dd>{profile.id}</dd>
                <dt>"Username"</dt>
                <dd>{profile.username}</dd>
                <dt>"Email"</dt>
                <dd>{profile.email}</dd>
                <dt>"Role"</dt>
                <dd><span class=role_class>{role}</span></dd>
                <dt>"Status"</dt>
                <dd><span class=status_class>{status}</span></dd>
            </dl>
        </div>
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use dashboard_core::BearerToken;

    #[test]
    fn test_anonymous_prompt() {
        let html = render(&Session::anonymous());
        assert!(html.contains("No profile information available"));
        assert!(html.contains("<a href=\"/login\">login</a>"));
    }

    #[test]
    fn test_profile_card() {
        let mut session = Session::checking(BearerToken::new("t").unwrap());
        session.resolve(Ok(UserProfile {
            id: "u-1".to_string(),
            email: "owner@example.com".to_string(),
            username: "root".to_string(),
            role: "owner".to_string(),
            status: "approved".to_string(),
        }));

        let html = render(&session);
        assert!(html.contains("<dd>root</dd>"));
        assert!(html.contains("<dd>owner@example.com</dd>"));
        assert!(html.contains("<span class=\"badge badge-pending\">Owner</span>"));
        assert!(html.contains("<span class=\"badge badge-approved\">Approved</span>"));
        assert!(!html.contains("No profile information available"));
    }
}
