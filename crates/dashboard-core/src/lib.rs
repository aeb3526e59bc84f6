//! Core types and utilities for the admin dashboard

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod market;
pub mod snapshot;
pub mod table;
pub mod types;
pub mod users;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use snapshot::{FetchTicket, Snapshot};
pub use table::{SortDirection, SortSpec, TableRecord, TableState, TableView, ViewStatus};
pub use types::{
    BearerToken, Credentials, LoginResponse, MarketAsset, RegisterResponse, Registration, Role,
    User, UserProfile, UserStatus,
};
pub use users::{Decision, StatusFilter};

/// Initialize the logging system
///
/// `RUST_LOG` wins over the configured level. `format = "json"` selects
/// structured output, anything else the human readable formatter.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &config::LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.format.eq_ignore_ascii_case("json") {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };

    result.map_err(|e| Error::Other(format!("Failed to initialize logging: {e}")))
}
