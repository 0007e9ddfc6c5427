use serde::{Deserialize, Serialize};
use shelflife_core::{ExpiryWindow, WindowError};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid label pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Label list '{0}' must not be empty")]
    EmptyLabels(&'static str),
    #[error(transparent)]
    Window(#[from] WindowError),
}

/// Label words that introduce a manufacturing or expiry date.
///
/// Matching is case-sensitive; list every casing that should be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub manufacturing: Vec<String>,
    pub expiry: Vec<String>,
    /// Expiry labels only trusted in front of numeric `D-M-Y` dates.
    pub expiry_numeric_only: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            manufacturing: owned(&[
                "MFG",
                "Mfg",
                "mfg",
                "Manufacturing",
                "MANUFACTURING",
                "Date of Manufacture",
                "DOM",
                "Production",
                "PRODUCTION",
            ]),
            expiry: owned(&["EXP", "Exp", "exp", "Expiry", "EXPIRY", "Best Before", "BBE"]),
            expiry_numeric_only: owned(&["USE BY", "Use By"]),
        }
    }
}

impl LabelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.manufacturing.iter().all(|l| l.trim().is_empty()) {
            return Err(ConfigError::EmptyLabels("manufacturing"));
        }
        if self.expiry.iter().all(|l| l.trim().is_empty()) {
            return Err(ConfigError::EmptyLabels("expiry"));
        }
        Ok(())
    }
}

/// Top-level settings, usually read from `shelflife.toml`.
///
/// ```toml
/// notification_days = 5
///
/// [labels]
/// expiry = ["EXP", "Expires"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Days ahead of expiry at which an item counts as expiring soon.
    pub notification_days: i64,
    pub labels: LabelConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notification_days: ExpiryWindow::default().notification_days(),
            labels: LabelConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.labels.validate()?;
        config.window()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn window(&self) -> Result<ExpiryWindow, ConfigError> {
        Ok(ExpiryWindow::new(self.notification_days)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let c = Config::from_toml("").unwrap();
        assert_eq!(c, Config::default());
        assert_eq!(c.notification_days, 3);
        assert!(c.labels.expiry.contains(&"Best Before".to_string()));
    }

    #[test]
    fn partial_label_override_keeps_other_defaults() {
        let c = Config::from_toml(
            r#"
            notification_days = 7
            [labels]
            expiry = ["Expires", "EXP"]
            "#,
        )
        .unwrap();
        assert_eq!(c.notification_days, 7);
        assert_eq!(c.labels.expiry, vec!["Expires", "EXP"]);
        assert_eq!(c.labels.manufacturing, LabelConfig::default().manufacturing);
    }

    #[test]
    fn empty_label_list_rejected() {
        let err = Config::from_toml("[labels]\nmanufacturing = []").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyLabels("manufacturing")));
    }

    #[test]
    fn negative_window_rejected() {
        let err = Config::from_toml("notification_days = -2").unwrap_err();
        assert!(matches!(err, ConfigError::Window(_)));
    }

    #[test]
    fn malformed_toml_rejected() {
        assert!(matches!(
            Config::from_toml("notification_days = ").unwrap_err(),
            ConfigError::Toml(_)
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelflife.toml");
        std::fs::write(&path, "notification_days = 1\n").unwrap();
        let c = Config::load(&path).unwrap();
        assert_eq!(c.window().unwrap().notification_days(), 1);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
