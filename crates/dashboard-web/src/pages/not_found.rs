//! 404 Not Found page

use crate::html::Layout;
use dashboard_client::Session;
use leptos::prelude::*;

/// 404 Not Found page
#[must_use]
pub fn render() -> String {
    Layout::new("Page Not Found", "", &Session::anonymous()).render(view! {
        <div class="not-found">
            <h2>"Page Not Found"</h2>
            <p>"The page you are looking for does not exist."</p>
            <a href="/dashboard" class="btn btn-primary">"Return to Dashboard"</a>
        </div>
    })
}
