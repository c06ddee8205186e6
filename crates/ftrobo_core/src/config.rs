//! Extension configuration.
//!
//! # Invariants
//! - `short_name` is a non-empty ASCII alphanumeric word starting with a
//!   lowercase letter; it prefixes every selector.
//! - `marker_prefix` is a Host symbol reference: `$` followed by ASCII
//!   alphanumerics or `_`, the same rule label part tokens follow.

use crate::blocks::registry::{DEFAULT_MARKER_PREFIX, DEFAULT_NAMESPACE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Startup configuration consumed once by `Extension::initialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Namespace prefix for selectors, e.g. `ftrobo`.
    pub short_name: String,
    /// Symbol prepended to every contributed block spec.
    pub marker_prefix: String,
    /// Selectors kept out of every palette.
    pub hidden_selectors: BTreeSet<String>,
    /// Log level applied when the embedding app initializes logging.
    pub log_level: Option<String>,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            short_name: DEFAULT_NAMESPACE.to_string(),
            marker_prefix: DEFAULT_MARKER_PREFIX.to_string(),
            hidden_selectors: BTreeSet::new(),
            log_level: None,
        }
    }
}

impl ExtensionConfig {
    /// Parses and validates a JSON configuration; absent fields use defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Json(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_short_name(&self.short_name) {
            return Err(ConfigError::InvalidShortName(self.short_name.clone()));
        }
        let marker_name = self.marker_prefix.strip_prefix('$').unwrap_or_default();
        if marker_name.is_empty()
            || !marker_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::InvalidMarkerPrefix(self.marker_prefix.clone()));
        }
        Ok(())
    }
}

fn is_valid_short_name(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric())
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidShortName(String),
    InvalidMarkerPrefix(String),
    Json(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidShortName(value) => write!(f, "short name is invalid: {value:?}"),
            Self::InvalidMarkerPrefix(value) => {
                write!(f, "marker prefix is invalid: {value:?} (expected `$name`)")
            }
            Self::Json(message) => write!(f, "configuration is not valid JSON: {message}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ExtensionConfig};

    #[test]
    fn defaults_are_valid() {
        let config = ExtensionConfig::default();
        assert_eq!(config.short_name, "ftrobo");
        assert_eq!(config.marker_prefix, "$ftrobo");
        config.validate().expect("default config should validate");
    }

    #[test]
    fn parses_partial_json_with_defaults() {
        let config = ExtensionConfig::from_json_str(
            r#"{"hidden_selectors": ["ftroboDistance"], "log_level": "debug"}"#,
        )
        .expect("partial config should parse");
        assert_eq!(config.short_name, "ftrobo");
        assert!(config.hidden_selectors.contains("ftroboDistance"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn rejects_invalid_short_names() {
        for name in ["", "Ftrobo", "ft-robo", "1ftrobo"] {
            let config = ExtensionConfig {
                short_name: name.to_string(),
                ..ExtensionConfig::default()
            };
            let err = config.validate().expect_err("invalid short name must fail");
            assert!(matches!(err, ConfigError::InvalidShortName(_)));
        }
    }

    #[test]
    fn rejects_invalid_marker_prefix() {
        for marker in ["", "ftrobo", "$", "$ft robo", "$ft.robo", "$ft%n", "$ftröbo"] {
            let config = ExtensionConfig {
                marker_prefix: marker.to_string(),
                ..ExtensionConfig::default()
            };
            let err = config.validate().expect_err("invalid marker must fail");
            assert!(matches!(err, ConfigError::InvalidMarkerPrefix(_)));
        }
    }

    #[test]
    fn accepted_marker_prefix_is_a_valid_label_part_token() {
        let config = ExtensionConfig {
            marker_prefix: "$ft_robo2".to_string(),
            ..ExtensionConfig::default()
        };
        config.validate().expect("underscore and digits are allowed");
        if let Err(err) = crate::extension::Extension::initialize(config) {
            panic!("marker should register as a label part: {err}");
        }
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ExtensionConfig::from_json_str("{").expect_err("malformed json must fail");
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
