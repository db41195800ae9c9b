use std::path::Path;

use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, DatabaseConfig, LoggingConfig, ServerConfig};

/// The configuration file read when no path is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";

/// Loads the application configuration.
///
/// Sources are layered, later ones winning: built-in defaults, the TOML file at
/// `path` (optional, skipped if missing), `ROSTER__SECTION__KEY` environment
/// variables, and finally `DATABASE_URL`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5000)?
        .set_default("database.url", "sqlite://students.db")?
        .set_default("database.max_connections", 5)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("logging.level", "info")?
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("ROSTER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}

/// Server overrides accepted on the command line.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ServerOverrides {
    /// Address to bind, overriding `server.host`.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, overriding `server.port`.
    #[arg(long)]
    pub port: Option<u16>,
}

#[cfg(feature = "clap")]
impl ServerOverrides {
    /// Applies any overrides given on the command line and re-validates.
    pub fn apply(&self, config: &mut Config) -> Result<(), ConfigError> {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
            [server]
            port = 8080

            [logging]
            level = "debug"
            directory = "logs"
            "#,
        );
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.directory.as_deref(), Some("logs"));
    }

    #[test]
    fn zero_connections_is_rejected() {
        let file = write_config(
            r#"
            [database]
            max_connections = 0
            "#,
        );
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unparsable_host_is_rejected() {
        let file = write_config(
            r#"
            [server]
            host = "not a host"
            "#,
        );
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_file_is_a_load_error() {
        let file = write_config("[server\nport = ");
        let err = load_config(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Load(_)));
        assert!(err.to_string().contains("file or environment"));
    }

    #[test]
    fn mistyped_value_is_a_load_error() {
        let file = write_config(
            r#"
            [server]
            port = "eighty"
            "#,
        );
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
