//! Admin Dashboard Web Interface
//!
//! Server-rendered pages for account viewing, user approval and the market
//! table, backed by the internal user/auth API and the public market API.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod cli;
pub mod components;
pub mod extractors;
pub mod fetch;
pub mod handlers;
pub mod html;
pub mod menu;
pub mod pages;
pub mod query;
pub mod routes;
pub mod server;
pub mod session_cookie;
pub mod state;

// Re-export the main functions
pub use server::{build_app, build_app_with_state};
pub use state::AppState;
