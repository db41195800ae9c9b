use thiserror::Error;

/// Why the roster settings could not be produced.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A layer could not be read or deserialized: the TOML file, a `ROSTER__*`
    /// variable, or the `DATABASE_URL` override.
    #[error("Failed to load configuration from file or environment: {0}")]
    Load(#[from] config::ConfigError),
    /// The merged settings were read but are not usable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
