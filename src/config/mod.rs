//! Configuration module
//!
//! Reads the environment once at startup (`PAGER`, `GLAMOUR_STYLE`) and
//! loads TOML style sheets for custom terminal styles.

mod types;

pub use types::{Config, NamedStyle, StyleSheet, DEFAULT_PAGER, DEFAULT_STYLE};

use crate::error::{MarkoError, Result};
use std::fs;
use std::path::Path;

impl Config {
    /// Build the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            pager: non_blank("PAGER").unwrap_or_else(|| DEFAULT_PAGER.to_string()),
            style: non_blank("GLAMOUR_STYLE").unwrap_or_else(|| DEFAULT_STYLE.to_string()),
        }
    }

    /// Program and arguments of the pager, or `None` for a blank command
    pub fn pager_command(&self) -> Option<(&str, Vec<&str>)> {
        let mut parts = self.pager.split_whitespace();
        let program = parts.next()?;
        Some((program, parts.collect()))
    }
}

/// Load a custom terminal style from a TOML file
pub fn load_style_sheet(path: &Path) -> Result<StyleSheet> {
    let content = fs::read_to_string(path).map_err(|e| {
        MarkoError::Render(format!(
            "cannot read style '{}': {}",
            path.display(),
            e
        ))
    })?;

    toml::from_str(&content).map_err(|e| {
        MarkoError::Render(format!("invalid style '{}': {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_vars_defaults() {
        let env = vars(&[]);
        let config = Config::from_vars(|k| env.get(k).cloned());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_vars_overrides() {
        let env = vars(&[("PAGER", "more"), ("GLAMOUR_STYLE", "light")]);
        let config = Config::from_vars(|k| env.get(k).cloned());
        assert_eq!(config.pager, "more");
        assert_eq!(config.style, "light");
    }

    #[test]
    fn test_from_vars_blank_values_fall_back() {
        let env = vars(&[("PAGER", "   "), ("GLAMOUR_STYLE", "")]);
        let config = Config::from_vars(|k| env.get(k).cloned());
        assert_eq!(config.pager, DEFAULT_PAGER);
        assert_eq!(config.style, DEFAULT_STYLE);
    }

    #[test]
    fn test_pager_command_split() {
        let config = Config {
            pager: "less -R  -F".to_string(),
            ..Config::default()
        };
        let (program, args) = config.pager_command().unwrap();
        assert_eq!(program, "less");
        assert_eq!(args, vec!["-R", "-F"]);
    }

    #[test]
    fn test_pager_command_blank() {
        let config = Config {
            pager: " ".to_string(),
            ..Config::default()
        };
        assert!(config.pager_command().is_none());
    }

    #[test]
    fn test_load_style_sheet() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("style.toml");
        fs::write(&path, "base = \"dracula\"\nbold = \"yellow\"\n").unwrap();

        let sheet = load_style_sheet(&path).unwrap();
        assert_eq!(sheet.base, NamedStyle::Dracula);
        assert_eq!(sheet.bold.as_deref(), Some("yellow"));
    }

    #[test]
    fn test_load_missing_style_sheet() {
        let result = load_style_sheet(Path::new("/nonexistent/style.toml"));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .starts_with("render failed: cannot read style"));
    }

    #[test]
    fn test_load_malformed_style_sheet() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("style.toml");
        fs::write(&path, "base = 42").unwrap();

        let result = load_style_sheet(&path);
        assert!(matches!(result, Err(MarkoError::Render(_))));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("invalid style"));
    }
}
