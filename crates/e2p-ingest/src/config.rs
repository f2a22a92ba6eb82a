//! Configuration file loading and command-line overrides.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use e2p_model::{Config, DEFAULT_CONFIG_FILE, Orientation, PageSize};

use crate::error::ConfigError;

/// Values given on the command line; each replaces its config-file value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub input: Option<String>,
    pub output: Option<String>,
    pub font: Option<String>,
    pub font_size: Option<f32>,
    pub page_orientation: Option<Orientation>,
    pub page_size: Option<PageSize>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.input.clone_from(input);
        }
        if let Some(output) = &self.output {
            config.output.clone_from(output);
        }
        if let Some(font) = &self.font {
            config.font.clone_from(font);
        }
        if let Some(size) = self.font_size {
            config.font_size = size;
        }
        if let Some(orientation) = self.page_orientation {
            config.page_orientation = orientation;
        }
        if let Some(size) = self.page_size {
            config.page_size = size;
        }
    }
}

/// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] when no
/// path is given.
///
/// An explicit path must exist. A missing default file is not an error: the
/// built-in defaults are used and a warning is logged.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(error) if !explicit && error.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Config::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    let config: Config =
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Load configuration, apply overrides, and validate the result.
///
/// # Errors
///
/// Returns a [`ConfigError`] if loading fails or a value is out of range.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<Config, ConfigError> {
    let mut config = load_config(path)?;
    overrides.apply(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Reject values no renderer can work with.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] naming the offending key.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    positive("mfont_size", config.font_size)?;
    positive("mleading", config.leading)?;
    positive("mcover_page_size", config.cover_scale)?;
    if config.sections.is_empty() {
        return Err(ConfigError::Invalid {
            key: "msections",
            message: "at least one section label is required".to_string(),
        });
    }
    if config.col_widths.iter().any(|pct| !pct.is_finite() || *pct < 0.0) {
        return Err(ConfigError::Invalid {
            key: "mcol_widths",
            message: "percentages must be non-negative numbers".to_string(),
        });
    }
    Ok(())
}

fn positive(key: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key,
            message: format!("expected a positive number, got {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_file_values() {
        let mut config = Config::default();
        let overrides = ConfigOverrides {
            input: Some("feed.json".to_string()),
            font_size: Some(10.0),
            page_orientation: Some(Orientation::Portrait),
            page_size: Some(PageSize::Letter),
            ..Default::default()
        };
        overrides.apply(&mut config);
        assert_eq!(config.input, "feed.json");
        assert_eq!(config.font_size, 10.0);
        assert_eq!(config.page_orientation, Orientation::Portrait);
        assert_eq!(config.page_size, PageSize::Letter);
        assert_eq!(config.font, "Helvetica");
    }

    #[test]
    fn rejects_non_positive_font_size() {
        let config = Config {
            font_size: 0.0,
            ..Config::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "mfont_size", .. }));
    }

    #[test]
    fn rejects_empty_sections() {
        let config = Config {
            sections: Vec::new(),
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
