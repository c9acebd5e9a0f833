//! Configuration loading and parsing

use anyhow::{Context, Result};
use dbc_studio_core::{EditorDefaults, FrameIdFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub defaults: EditorDefaults,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub frame_id_format: FrameIdFormat,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Target directory for `normalize` (default: rewrite in place)
    pub directory: Option<PathBuf>,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [defaults]
            first_frame_id = 0x600
            message_base_name = "Diag"

            [display]
            frame_id_format = "dec"

            [output]
            directory = "normalized"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.defaults.first_frame_id, 0x600);
        assert_eq!(config.defaults.message_base_name, "Diag");
        assert_eq!(config.defaults.signal_base_name, "Signal");
        assert_eq!(config.display.frame_id_format, FrameIdFormat::Decimal);
        assert_eq!(config.output.directory, Some(PathBuf::from("normalized")));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.defaults, EditorDefaults::default());
        assert_eq!(config.display.frame_id_format, FrameIdFormat::Hex);
        assert!(config.output.directory.is_none());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result: std::result::Result<AppConfig, _> = toml::from_str(
            r#"
            [display]
            frame_id_format = "octal"
        "#,
        );
        assert!(result.is_err());
    }
}
