//! Configuration loading and validation for `sealctl`.

use anyhow::{Context, Result};
use serde::Deserialize;
use token_codec::CodecConfig;

/// Validated `sealctl` configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Codec settings (`CODEC_PASSPHRASE`).
    pub codec: CodecConfig,

    /// Tracing log level.
    pub log_level: String,
}

/// Settings read directly from unprefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
struct ToolSettings {
    /// Tracing log level (`LOG_LEVEL`).
    #[serde(default = "default_log_level")]
    log_level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `CODEC_PASSPHRASE` is absent or blank, or if the
    /// log level is blank.
    pub fn from_env() -> Result<Self> {
        let settings: ToolSettings = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build sealctl configuration")?
            .try_deserialize()
            .context("failed to deserialise sealctl configuration")?;

        let codec = CodecConfig::from_env().context("codec configuration invalid")?;

        let c = Config {
            codec,
            log_level: settings.log_level,
        };
        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty when set");
        }
        Ok(())
    }
}
