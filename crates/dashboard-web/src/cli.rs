//! Command line interface for the web server

use clap::Parser;
use dashboard_core::Config;
use std::path::PathBuf;
use tracing::warn;

/// Command line interface for the dashboard web server
#[derive(Debug, Parser)]
#[command(
    name = "dashboard-web-server",
    version = env!("CARGO_PKG_VERSION"),
    about = "Server-rendered admin dashboard",
    long_about = "Serves the admin dashboard: user approval backed by the internal auth API and a market table backed by the public market API."
)]
pub struct Cli {
    /// Configuration file path (defaults to ./dashboard.{toml,yaml,json})
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Host to bind to, overrides the configuration
    #[arg(long, env = "DASHBOARD_HOST")]
    pub host: Option<String>,

    /// Port to listen on, overrides the configuration
    #[arg(short, long, env = "DASHBOARD_PORT")]
    pub port: Option<u16>,
}

impl Cli {
    /// Apply command line overrides on top of loaded configuration
    #[must_use]
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(host) = &self.host {
            config.webserver.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.webserver.port = port;
        }
        config
    }

    /// Load configuration from `--config` or the default locations
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation.
    pub fn load_config(&self) -> dashboard_core::Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }
}

/// Report a configuration that failed to load. Logging is configured from
/// the result, so this runs once the subscriber is installed.
pub fn warn_config_fallback(err: &dashboard_core::Error) {
    warn!(error = %err, "Failed to load config, using defaults");
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from(["dashboard-web-server", "--host", "0.0.0.0", "-p", "8080"]);
        let config = cli.apply(Config::default());
        assert_eq!(config.webserver.host, "0.0.0.0");
        assert_eq!(config.webserver.port, 8080);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let cli = Cli::parse_from(["dashboard-web-server"]);
        assert!(cli.config.is_none());
        let config = cli.apply(Config::default());
        assert_eq!(config.webserver.port, 3000);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["dashboard-web-server", "--config", "/nonexistent/dashboard.toml"]);
        assert!(cli.load_config().is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_fallback_is_a_warning() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            warn_config_fallback(&dashboard_core::Error::validation("webserver.port", "must not be 0"));
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("Failed to load config, using defaults"));
    }
}
