//! Configuration management for the admin dashboard

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment prefix shared by every configuration key
pub const ENV_PREFIX: &str = "DASHBOARD";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Web server configuration
    #[serde(default)]
    pub webserver: WebServerConfig,

    /// Internal user/auth API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Public market data API configuration
    #[serde(default)]
    pub market: MarketConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Table defaults
    #[serde(default)]
    pub table: TableConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Web server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Internal user/auth API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is resolved against
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Age after which a session's cached user list is fetched again
    #[serde(default = "default_users_max_age")]
    pub users_max_age_secs: u64,
}

/// Public market data API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Base URL of the market API
    #[serde(default = "default_market_base_url")]
    pub base_url: String,

    /// Quote currency
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,

    /// Number of assets requested in the single page fetched
    #[serde(default = "default_per_page")]
    pub per_page: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Age after which the cached market list is fetched again
    #[serde(default = "default_max_age")]
    pub max_age_secs: u64,
}

/// Session cookie configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie holding the bearer token
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Mark the cookie `Secure`
    #[serde(default)]
    pub secure_cookie: bool,
}

/// Table defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Rows per page when the request does not pick one
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Page sizes offered to the user
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_api_base_url() -> String {
    std::env::var("DASHBOARD_API_BASE_URL")
        .or_else(|_| std::env::var("API_BASE_URL"))
        .unwrap_or_else(|_| "http://localhost:3030/".to_string())
}

const fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("rs-admin-dashboard/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_users_max_age() -> u64 {
    30
}

fn default_market_base_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}

fn default_vs_currency() -> String {
    "usd".to_string()
}

const fn default_per_page() -> u16 {
    100
}

const fn default_max_age() -> u64 {
    60
}

fn default_cookie_name() -> String {
    "token".to_string()
}

const fn default_page_size() -> usize {
    crate::table::DEFAULT_PAGE_SIZE
}

fn default_page_size_options() -> Vec<usize> {
    crate::table::PAGE_SIZE_OPTIONS.to_vec()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
            users_max_age_secs: default_users_max_age(),
        }
    }
}

impl ApiConfig {
    /// Request timeout as a [`Duration`]
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Maximum age of a cached user list as a [`Duration`]
    #[must_use]
    pub const fn users_max_age(&self) -> Duration {
        Duration::from_secs(self.users_max_age_secs)
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: default_market_base_url(),
            vs_currency: default_vs_currency(),
            per_page: default_per_page(),
            request_timeout_secs: default_request_timeout(),
            max_age_secs: default_max_age(),
        }
    }
}

impl MarketConfig {
    /// Request timeout as a [`Duration`]
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Maximum snapshot age as a [`Duration`]
    #[must_use]
    pub const fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            secure_cookie: false,
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            page_size_options: default_page_size_options(),
        }
    }
}

impl TableConfig {
    /// Resolve a requested page size, falling back to the default for
    /// anything not on offer
    #[must_use]
    pub fn resolve_page_size(&self, requested: Option<usize>) -> usize {
        requested
            .filter(|size| self.page_size_options.contains(size))
            .unwrap_or(self.default_page_size)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from `dashboard.{toml,yaml,json}` and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::build(config::File::with_name("dashboard").required(false))
    }

    /// Load configuration from an explicit file, then the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or the result cannot be parsed.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> crate::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot work
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn validate(&self) -> crate::Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(crate::Error::validation("api.base_url", "must not be empty"));
        }
        if self.market.base_url.trim().is_empty() {
            return Err(crate::Error::validation(
                "market.base_url",
                "must not be empty",
            ));
        }
        if !(1..=250).contains(&self.market.per_page) {
            return Err(crate::Error::validation(
                "market.per_page",
                "must be between 1 and 250",
            ));
        }
        if self.session.cookie_name.trim().is_empty() {
            return Err(crate::Error::validation(
                "session.cookie_name",
                "must not be empty",
            ));
        }
        if self.table.page_size_options.contains(&0) {
            return Err(crate::Error::validation(
                "table.page_size_options",
                "page sizes must be positive",
            ));
        }
        if !self
            .table
            .page_size_options
            .contains(&self.table.default_page_size)
        {
            return Err(crate::Error::validation(
                "table.default_page_size",
                "must be one of the page size options",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::missing_panics_doc,
    clippy::field_reassign_with_default,
    clippy::uninlined_format_args
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.webserver.host, "127.0.0.1");
        assert_eq!(config.webserver.port, 3000);

        assert!(!config.api.base_url.is_empty());
        assert_eq!(config.api.request_timeout_secs, 30);
        assert!(config.api.user_agent.starts_with("rs-admin-dashboard/"));
        assert_eq!(config.api.users_max_age_secs, 30);

        assert_eq!(config.market.base_url, "https://api.coingecko.com/api/v3");
        assert_eq!(config.market.vs_currency, "usd");
        assert_eq!(config.market.per_page, 100);
        assert_eq!(config.market.max_age_secs, 60);

        assert_eq!(config.session.cookie_name, "token");
        assert!(!config.session.secure_cookie);

        assert_eq!(config.table.default_page_size, 10);
        assert_eq!(config.table.page_size_options, vec![10, 20, 30, 50, 100]);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_durations() {
        let config = Config::default();
        assert_eq!(config.api.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.api.users_max_age(), Duration::from_secs(30));
        assert_eq!(config.market.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.market.max_age(), Duration::from_secs(60));
    }

    #[test]
    fn test_resolve_page_size() {
        let table = TableConfig::default();

        assert_eq!(table.resolve_page_size(None), 10);
        assert_eq!(table.resolve_page_size(Some(50)), 50);
        assert_eq!(table.resolve_page_size(Some(7)), 10);
        assert_eq!(table.resolve_page_size(Some(0)), 10);
    }

    #[test]
    fn test_partial_config_deserialization() {
        let json_str = r#"{
            "webserver": {"port": 8081},
            "api": {"base_url": "http://api.internal:3030/"},
            "market": {}
        }"#;

        let config: Config = serde_json::from_str(json_str).unwrap();

        assert_eq!(config.webserver.host, "127.0.0.1");
        assert_eq!(config.webserver.port, 8081);
        assert_eq!(config.api.base_url, "http://api.internal:3030/");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.market.per_page, 100);
        assert_eq!(config.session.cookie_name, "token");
        assert_eq!(config.table.default_page_size, 10);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();

        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.webserver.port, config.webserver.port);
        assert_eq!(deserialized.api.base_url, config.api.base_url);
        assert_eq!(deserialized.market.vs_currency, config.market.vs_currency);
        assert_eq!(
            deserialized.table.page_size_options,
            config.table.page_size_options
        );
    }

    #[test]
    fn test_validate_rejects_default_page_size_not_on_offer() {
        let mut config = Config::default();
        config.table.default_page_size = 15;

        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: table.default_page_size - must be one of the page size options"
        );
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.table.page_size_options = vec![0, 10];

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let mut config = Config::default();
        config.api.base_url = "   ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.session.cookie_name = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.market.per_page = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[webserver]
host = "0.0.0.0"
port = 9000

[api]
base_url = "http://users.example:4000/"

[table]
default_page_size = 20
"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();

        assert_eq!(config.webserver.host, "0.0.0.0");
        assert_eq!(config.webserver.port, 9000);
        assert_eq!(config.api.base_url, "http://users.example:4000/");
        assert_eq!(config.table.default_page_size, 20);
        assert_eq!(config.market.per_page, 100);
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[table]\ndefault_page_size = 12").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, crate::Error::Validation { .. }));
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = Config::load_from(Path::new("/nonexistent/dashboard.toml"));
        assert!(matches!(result, Err(crate::Error::Configuration { .. })));
    }
}
