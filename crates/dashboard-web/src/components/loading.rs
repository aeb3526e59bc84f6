//! Loading, failure and stale-data states

use leptos::prelude::*;

/// Spinner with a message
#[component]
pub fn Loading(
    /// What is being loaded
    #[prop(into)]
    message: String,
) -> impl IntoView {
    view! {
        <div class="loading" aria-busy="true">
            <div class="spinner"></div>
            <p>{message}</p>
        </div>
    }
}

/// Generic load failure with a retry link
#[component]
pub fn LoadFailed(
    /// Message shown instead of the data
    #[prop(into)]
    message: String,
    /// Link that retries the load
    #[prop(into)]
    retry_href: String,
) -> impl IntoView {
    view! {
        <div class="error" role="alert">
            <p>{message}</p>
            <a href=retry_href>"Try again"</a>
        </div>
    }
}

/// Notice shown above data kept from an earlier fetch
#[component]
pub fn OutdatedNotice(
    /// Link that retries the refresh
    #[prop(into)]
    retry_href: String,
) -> impl IntoView {
    view! {
        <div class="notice error" role="status">
            "Could not refresh, showing earlier data. "
            <a href=retry_href>"Try again"</a>
        </div>
    }
}
