//! Page shell shared by every page, rendered to HTML on the server

use crate::menu::{MenuGroup, menu};
use chrono::{Datelike, Utc};
use dashboard_client::Session;
use leptos::prelude::*;

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;color:#1f2937;background:#f9fafb}\
.shell{display:flex;min-height:100vh}\
.sidebar{width:220px;background:#111827;color:#e5e7eb;padding:1rem}\
.sidebar a{color:#e5e7eb;text-decoration:none;display:block;padding:.35rem .5rem;border-radius:4px}\
.sidebar a.active{background:#374151;font-weight:600}\
.sidebar .group{margin-top:1rem;font-size:.75rem;text-transform:uppercase;color:#9ca3af}\
.content{flex:1;display:flex;flex-direction:column}\
header{display:flex;justify-content:space-between;align-items:center;padding:.75rem 1.5rem;background:#fff;border-bottom:1px solid #e5e7eb}\
header .user{display:flex;gap:.5rem;align-items:center}\
main{padding:1.5rem;flex:1}\
footer{padding:.75rem 1.5rem;font-size:.8rem;color:#6b7280}\
table{border-collapse:collapse;width:100%;background:#fff}\
th,td{padding:.5rem .75rem;border-bottom:1px solid #e5e7eb;text-align:left}\
th a{color:inherit;text-decoration:none}\
.toolbar{display:flex;gap:1rem;align-items:center;margin-bottom:1rem;flex-wrap:wrap}\
.search{display:flex;gap:.5rem}\
.pagination{display:flex;gap:.5rem;align-items:center;justify-content:space-between;margin-top:1rem}\
.page-size,.pagination-controls,.actions,.summary{display:flex;gap:.5rem;align-items:center}\
.pagination a.disabled{pointer-events:none;color:#9ca3af}\
.badge{padding:.1rem .5rem;border-radius:9999px;font-size:.75rem}\
.badge-pending{background:#fef3c7}.badge-approved{background:#d1fae5}.badge-rejected{background:#fee2e2}\
.positive{color:#059669}.negative{color:#dc2626}\
.empty,.loading,.error{padding:2rem;text-align:center;color:#6b7280}\
.error{color:#dc2626}\
.notice{padding:.75rem;border-radius:4px;margin-bottom:1rem;background:#eff6ff}\
.notice.error{background:#fef2f2;text-align:left}\
.card{background:#fff;border:1px solid #e5e7eb;border-radius:8px;padding:1.5rem;max-width:32rem}\
.inline{display:inline}\
";

/// Render a view to an HTML string
#[must_use]
pub fn render_html<F, V>(view: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    let owner = Owner::new();
    owner.with(|| view().to_html())
}

/// Page shell: head, navigation menu, header with the session, footer
#[derive(Debug)]
pub struct Layout<'a> {
    title: &'a str,
    path: &'a str,
    session: &'a Session,
    refresh_secs: Option<u32>,
    show_menu: bool,
}

impl<'a> Layout<'a> {
    /// Shell for the page at `path`
    #[must_use]
    pub const fn new(title: &'a str, path: &'a str, session: &'a Session) -> Self {
        Self {
            title,
            path,
            session,
            refresh_secs: None,
            show_menu: true,
        }
    }

    /// Ask the browser to reload after `secs`
    #[must_use]
    pub const fn refresh(mut self, secs: u32) -> Self {
        self.refresh_secs = Some(secs);
        self
    }

    /// Omit the sidebar (landing and auth pages)
    #[must_use]
    pub const fn without_menu(mut self) -> Self {
        self.show_menu = false;
        self
    }

    /// Wrap `body` into a complete document
    #[must_use]
    pub fn render<V>(&self, body: V) -> String
    where
        V: IntoView + 'static,
    {
        let title = self.title.to_string();
        let groups = self.show_menu.then(|| menu(self.path));
        let user_email = self.session.user().map(|user| user.email.clone());
        let refresh_secs = self.refresh_secs;

        render_html(move || {
            view! {
                <Document title groups user_email refresh_secs>
                    {body}
                </Document>
            }
        })
    }
}

#[component]
fn Document(
    title: String,
    groups: Option<Vec<MenuGroup>>,
    user_email: Option<String>,
    refresh_secs: Option<u32>,
    children: Children,
) -> impl IntoView {
    let tab_title = format!("{title} | Admin Dashboard");
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                {refresh_secs
                    .map(|secs| view! { <meta http-equiv="refresh" content={secs.to_string()}/> })}
                <title>{tab_title}</title>
                <style inner_html=STYLE></style>
            </head>
            <body>
                <div class="shell">
                    {groups.map(|groups| view! { <Sidebar groups/> })}
                    <div class="content">
                        <PageHeader title user_email/>
                        <main>{children()}</main>
                        <footer>{format!("\u{a9} {} Admin Dashboard", Utc::now().year())}</footer>
                    </div>
                </div>
            </body>
        </html>
    }
}

#[component]
fn Sidebar(groups: Vec<MenuGroup>) -> impl IntoView {
    view! {
        <nav class="sidebar">
            <a href="/"><strong>"Admin Dashboard"</strong></a>
            {groups
                .into_iter()
                .map(|group| {
                    view! {
                        {group.label.map(|label| view! { <div class="group">{label}</div> })}
                        {group
                            .entries
                            .into_iter()
                            .map(|entry| {
                                view! {
                                    <a href={entry.href} class:active={entry.active}>
                                        {entry.label}
                                    </a>
                                }
                            })
                            .collect_view()}
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[component]
fn PageHeader(title: String, user_email: Option<String>) -> impl IntoView {
    let who = match user_email {
        Some(email) => view! {
            <span>{email}</span>
            <form class="inline" method="post" action="/logout">
                <button type="submit">"Logout"</button>
            </form>
        }
        .into_any(),
        None => view! { <a href="/login">"Login"</a> }.into_any(),
    };
    view! {
        <header>
            <h1>{title}</h1>
            <div class="user">{who}</div>
        </header>
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use dashboard_core::{BearerToken, UserProfile};

    #[test]
    fn test_layout_marks_active_menu_entry() {
        let session = Session::anonymous();
        let page = Layout::new("Users", "/dashboard/users", &session)
            .render(view! { <p>"body"</p> });
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<a href=\"/dashboard/users\" class=\"active\">Users</a>"));
        assert!(page.contains("<a href=\"/dashboard\">Dashboard</a>"));
        assert!(page.contains("<a href=\"/login\">Login</a>"));
        assert!(page.contains("<p>body</p>"));
        assert!(!page.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn test_layout_refresh_and_no_menu() {
        let session = Session::anonymous();
        let page = Layout::new("Loading", "/dashboard", &session)
            .refresh(2)
            .without_menu()
            .render(());
        assert!(page.contains("http-equiv=\"refresh\" content=\"2\""));
        assert!(!page.contains("class=\"sidebar\""));
    }

    #[test]
    fn test_title_is_escaped() {
        let session = Session::anonymous();
        let page = Layout::new("<b>", "/", &session).render(());
        assert!(page.contains("<title>&lt;b&gt; | Admin Dashboard</title>"));
        assert!(!page.contains("<b>"));
    }

    #[test]
    fn test_signed_in_header_offers_logout() {
        let mut session = Session::checking(BearerToken::new("t").unwrap());
        session.resolve(Ok(UserProfile {
            id: "1".to_string(),
            email: "a@example.com".to_string(),
            username: "alice".to_string(),
            role: "user".to_string(),
            status: "approved".to_string(),
        }));
        let page = Layout::new("Account", "/dashboard/account", &session).render(());
        assert!(page.contains("<span>a@example.com</span>"));
        assert!(page.contains("action=\"/logout\""));
        assert!(!page.contains("<a href=\"/login\">"));
    }

    #[test]
    fn test_stylesheet_is_not_escaped() {
        let session = Session::anonymous();
        let page = Layout::new("Market", "/dashboard", &session).render(());
        assert!(page.contains(".sidebar a.active{"));
        assert!(page.contains(".badge-pending{background:#fef3c7}"));
    }
}
