//! Chat page

use crate::html::Layout;
use dashboard_client::Session;
use leptos::prelude::*;

/// Path of the chat page
pub const PATH: &str = "/dashboard/ai/chat";

/// Chat input without a backend behind it
#[must_use]
pub fn render(session: &Session) -> String {
    Layout::new("Chat AI", PATH, session).render(view! {
        <div class="chat">
            <div class="messages">
                <p class="empty">"Start a conversation."</p>
            </div>
            <form class="chat-input">
                <textarea name="message" placeholder="Type your message..." disabled=true></textarea>
                <button type="submit" disabled=true>"Send"</button>
            </form>
        </div>
    })
}
