use serde::{Deserialize, Serialize};

/// Pager used when `PAGER` is unset or blank
pub const DEFAULT_PAGER: &str = "less -r";

/// Style name used when `GLAMOUR_STYLE` is unset or blank
pub const DEFAULT_STYLE: &str = "auto";

/// Process-wide settings, read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Pager command line, split on whitespace when spawned
    pub pager: String,

    /// Terminal style: a built-in name or a path to a style sheet
    pub style: String,
}

/// Built-in terminal styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedStyle {
    #[default]
    Dark,
    Light,
    Dracula,
    NoTty,
    Ascii,
}

/// Custom terminal style loaded from a TOML file
///
/// Every field is optional; unset fields keep the look of `base`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    /// Built-in style the overrides are applied on top of
    pub base: NamedStyle,

    /// Foreground colors for header levels, starting at level 1
    pub headers: Vec<String>,

    /// Foreground color of bold text
    pub bold: Option<String>,

    /// Foreground color of italic text
    pub italic: Option<String>,

    /// Foreground color of inline code
    pub inline_code: Option<String>,

    /// Background color of code blocks
    pub code_block_bg: Option<String>,

    /// Character drawn for list bullets
    pub bullet: Option<char>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pager: DEFAULT_PAGER.to_string(),
            style: DEFAULT_STYLE.to_string(),
        }
    }
}

impl NamedStyle {
    /// Look up a built-in style by the name used in `GLAMOUR_STYLE`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            "dracula" => Some(Self::Dracula),
            "notty" => Some(Self::NoTty),
            "ascii" => Some(Self::Ascii),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.pager, "less -r");
        assert_eq!(config.style, "auto");
    }

    #[test]
    fn test_named_style_from_name() {
        assert_eq!(NamedStyle::from_name("dark"), Some(NamedStyle::Dark));
        assert_eq!(NamedStyle::from_name("Light"), Some(NamedStyle::Light));
        assert_eq!(NamedStyle::from_name("notty"), Some(NamedStyle::NoTty));
        assert_eq!(NamedStyle::from_name("dracula"), Some(NamedStyle::Dracula));
        assert_eq!(NamedStyle::from_name("ascii"), Some(NamedStyle::Ascii));
        assert_eq!(NamedStyle::from_name("auto"), None);
        assert_eq!(NamedStyle::from_name("solarized"), None);
    }

    #[test]
    fn test_style_sheet_partial() {
        let sheet: StyleSheet = toml::from_str(
            r##"
base = "light"
headers = ["#ff0000", "blue"]
bullet = "*"
"##,
        )
        .unwrap();
        assert_eq!(sheet.base, NamedStyle::Light);
        assert_eq!(sheet.headers, vec!["#ff0000", "blue"]);
        assert_eq!(sheet.bullet, Some('*'));
        assert_eq!(sheet.bold, None);
    }

    #[test]
    fn test_style_sheet_empty_uses_defaults() {
        let sheet: StyleSheet = toml::from_str("").unwrap();
        assert_eq!(sheet, StyleSheet::default());
        assert_eq!(sheet.base, NamedStyle::Dark);
    }
}
