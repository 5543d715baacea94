//! Map output configuration loaded from config.toml
//!
//! The `[map]` section controls how the price map is produced: which aggregation
//! strategy runs by default, how missing breakdown cells are rendered, and which
//! image stands in for communes without one. Every key is optional.

use crate::core::map_record::{DEFAULT_PLACEHOLDER_IMAGE, MapOptions};
use crate::core::presentation::NullRendering;
use crate::core::query::Strategy;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable overriding `[map].strategy`
pub const STRATEGY_ENV_VAR: &str = "PRICE_MAP_STRATEGY";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Price map settings
    #[serde(default)]
    pub map: MapConfig,
}

/// Settings of the `[map]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Image path used for communes that have none
    pub placeholder_image: String,
    /// How null breakdown cells are rendered in the output document
    pub null_rendering: NullRendering,
    /// Aggregation strategy used by the binary
    pub strategy: Strategy,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            null_rendering: NullRendering::default(),
            strategy: Strategy::default(),
        }
    }
}

impl MapConfig {
    /// Options handed to the aggregation engine.
    #[must_use]
    pub fn options(&self) -> MapOptions {
        MapOptions {
            placeholder_image: self.placeholder_image.clone(),
        }
    }

    /// Applies `PRICE_MAP_STRATEGY` on top of the file settings.
    ///
    /// # Errors
    /// Returns `Error::Config` if the variable holds an unknown strategy name.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var(STRATEGY_ENV_VAR) {
            self.strategy = value.parse()?;
            debug!("Strategy overridden from {STRATEGY_ENV_VAR}: {:?}", self.strategy);
        }
        Ok(())
    }
}

/// Loads map configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A value has the wrong type or an unknown variant
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from ./config.toml, falling back to defaults when the file
/// does not exist, then applies environment overrides.
pub fn load_default_config() -> Result<Config> {
    let path = Path::new("config.toml");
    let mut config = if path.exists() {
        load_config(path)?
    } else {
        info!("No config.toml found, using default map settings");
        Config::default()
    };
    config.map.apply_env_overrides()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_map_config() {
        let toml_str = r#"
            [map]
            placeholder_image = "img/none.png"
            null_rendering = "placeholder"
            strategy = "exact"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.map.placeholder_image, "img/none.png");
        assert_eq!(config.map.null_rendering, NullRendering::Placeholder);
        assert_eq!(config.map.strategy, Strategy::Exact);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config: Config = toml::from_str("[map]\nstrategy = \"fast\"\n").unwrap();
        assert_eq!(config.map.placeholder_image, DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(config.map.null_rendering, NullRendering::Structured);
        assert_eq!(config.map.strategy, Strategy::Fast);

        let empty: Config = toml::from_str("").unwrap();
        assert_eq!(empty.map.strategy, Strategy::Fast);
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[map]\nstrategy = \"approximate\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }

    #[test]
    fn test_load_config_unreadable_path_is_config_error() {
        // A directory cannot be read as a file
        let result = load_config(env!("CARGO_MANIFEST_DIR"));
        assert!(
            matches!(&result, Err(Error::Config { message }) if message.starts_with("Failed to read"))
        );
    }
}
