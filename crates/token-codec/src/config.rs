//! Codec configuration loading and validation.
//!
//! The passphrase is read from the environment at startup. A missing or blank
//! passphrase is a startup-time error; there is no compiled-in fallback.

use serde::Deserialize;
use thiserror::Error;

/// Prefix of the environment variables read by [`CodecConfig::from_env`].
pub const ENV_PREFIX: &str = "CODEC";

/// Errors produced while loading [`CodecConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The environment could not be read or deserialized.
    #[error("failed to load codec configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A required value is present but unusable.
    #[error("{0} is required and must not be empty")]
    Missing(&'static str),
}

/// Validated codec configuration.
#[derive(Clone, Deserialize)]
pub struct CodecConfig {
    /// Passphrase the codec key is derived from. **Required.**
    ///
    /// Read from `CODEC_PASSPHRASE`.
    pub passphrase: String,
}

impl CodecConfig {
    /// Build a config from an explicit passphrase.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if the passphrase is blank.
    pub fn new(passphrase: impl Into<String>) -> Result<Self, ConfigError> {
        let c = Self {
            passphrase: passphrase.into(),
        };
        c.validate()?;
        Ok(c)
    }

    /// Load and validate configuration from `CODEC_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `CODEC_PASSPHRASE` is absent or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load(source: config::Environment) -> Result<Self, ConfigError> {
        let c: CodecConfig = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.passphrase.trim().is_empty() {
            return Err(ConfigError::Missing("CODEC_PASSPHRASE"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for CodecConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecConfig")
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}
