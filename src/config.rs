//! Loading and validation of the service configuration

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// A named remote calendar source
#[derive(Clone, Debug, Deserialize)]
pub struct Target {
    pub url: Url,
}

/// The service configuration, loaded from a JSON file.
///
/// Immutable once loaded: every other component takes what it needs from it
/// at construction time.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Path prefix under which all routes are served
    #[serde(default)]
    pub base_url_path: String,
    #[serde(default)]
    pub bind_address: String,
    /// Maps target names to their respective URLs
    #[serde(default)]
    pub targets: HashMap<String, Target>,
    /// Groupings define which event types belong to which category
    #[serde(default)]
    pub groupings: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub default_group: String,
}

impl Config {
    /// Load and validate a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Loading configuration from {}", path.display());

        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: Config = serde_json::from_str(&data)?;
        config.validate()?;

        log::info!("Configuration loaded successfully");
        Ok(config)
    }

    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.base_url_path.is_empty() {
            return Err(ConfigError::Invalid(
                "base_url_path is required in the config file",
            ));
        }
        if self.targets.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one target is required in the config file",
            ));
        }
        if self.default_group.is_empty() {
            return Err(ConfigError::Invalid(
                "default_group is required in the config file",
            ));
        }
        if self.groupings.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one grouping is required in the config file",
            ));
        }

        if self.bind_address.is_empty() {
            self.bind_address = "0.0.0.0:8080".to_string();
            log::info!("bind_address not set in config, using default 0.0.0.0:8080");
        } else if self.bind_address.starts_with(':') {
            // A bare ":8080" means all interfaces
            self.bind_address = format!("0.0.0.0{}", self.bind_address);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_CONFIG: &str = r#"{
        "base_url_path": "/rooster",
        "targets": {
            "leidencal": { "url": "https://example.org/leiden/ical" }
        },
        "groupings": {
            "tentamen": ["exam"],
            "hoorcollege": ["lecture"]
        },
        "default_group": "overig"
    }"#;

    fn parse_and_validate(json: &str) -> Result<Config, ConfigError> {
        let mut config: Config = serde_json::from_str(json).unwrap();
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn example_config_is_valid() {
        let config = parse_and_validate(EXAMPLE_CONFIG).unwrap();

        assert_eq!(config.base_url_path, "/rooster");
        assert_eq!(config.targets["leidencal"].url.as_str(), "https://example.org/leiden/ical");
        assert_eq!(config.groupings["tentamen"], vec!["exam".to_string()]);
        assert_eq!(config.default_group, "overig");
        // The bind address falls back to the default
        assert_eq!(config.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        let missing_base = r#"{
            "targets": { "leidencal": { "url": "https://example.org/ical" } },
            "groupings": { "tentamen": ["exam"] },
            "default_group": "overig"
        }"#;
        assert!(matches!(
            parse_and_validate(missing_base),
            Err(ConfigError::Invalid("base_url_path is required in the config file"))
        ));

        let no_groupings = r#"{
            "base_url_path": "/rooster",
            "targets": { "leidencal": { "url": "https://example.org/ical" } },
            "groupings": {},
            "default_group": "overig"
        }"#;
        assert!(matches!(
            parse_and_validate(no_groupings),
            Err(ConfigError::Invalid("at least one grouping is required in the config file"))
        ));
    }

    #[test]
    fn go_style_bind_address_is_normalized() {
        let json = r#"{
            "base_url_path": "/rooster",
            "bind_address": ":9090",
            "targets": { "leidencal": { "url": "https://example.org/ical" } },
            "groupings": { "tentamen": ["exam"] },
            "default_group": "overig"
        }"#;
        let config = parse_and_validate(json).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:9090");
    }
}
