//! Terminal background detection for the `auto` style

use std::io::IsTerminal;
use std::time::Duration;

use tracing::debug;

use crate::config::NamedStyle;
use crate::display::terminal::{stdin_is_piped, stdout_is_tty};

/// How long to wait for the terminal to answer a background color query
const QUERY_TIMEOUT: Duration = Duration::from_millis(100);

/// Terminal background color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Relative luminance (BT.709 weights) in `0.0..=1.0`
    pub fn luminance(&self) -> f64 {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    pub fn is_light(&self) -> bool {
        self.luminance() > 0.5
    }
}

/// Style for a colored terminal with the given background
///
/// Unknown backgrounds are treated as dark.
pub fn style_for_background(background: Option<Rgb>) -> NamedStyle {
    match background {
        Some(rgb) if rgb.is_light() => NamedStyle::Light,
        _ => NamedStyle::Dark,
    }
}

/// Best guess at the terminal background color
///
/// Checks `COLORFGBG`, then known terminal defaults, then asks the terminal
/// itself when both stdin and stdout are attached to it.
pub fn detect() -> Option<Rgb> {
    if let Some(rgb) = std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| parse_colorfgbg(&value))
    {
        debug!(?rgb, "background from COLORFGBG");
        return Some(rgb);
    }

    if let Some(rgb) = std::env::var("TERM_PROGRAM")
        .ok()
        .and_then(|app| terminal_default(&app))
    {
        debug!(?rgb, "background from terminal default");
        return Some(rgb);
    }

    query_terminal()
}

/// Background index from `fg;bg` or `fg;default;bg`
fn parse_colorfgbg(value: &str) -> Option<Rgb> {
    let parts: Vec<&str> = value.split(';').collect();
    if parts.len() < 2 {
        return None;
    }
    parts.last()?.trim().parse::<u8>().ok().and_then(ansi_index_to_rgb)
}

fn terminal_default(app: &str) -> Option<Rgb> {
    match app {
        "Apple_Terminal" => Some(Rgb::new(255, 255, 255)),
        _ => None,
    }
}

/// Standard 16-color palette
fn ansi_index_to_rgb(index: u8) -> Option<Rgb> {
    let rgb = match index {
        0 => Rgb::new(0, 0, 0),
        1 => Rgb::new(205, 49, 49),
        2 => Rgb::new(13, 188, 121),
        3 => Rgb::new(229, 229, 16),
        4 => Rgb::new(36, 114, 200),
        5 => Rgb::new(188, 63, 188),
        6 => Rgb::new(17, 168, 205),
        7 => Rgb::new(229, 229, 229),
        8 => Rgb::new(102, 102, 102),
        9 => Rgb::new(241, 76, 76),
        10 => Rgb::new(35, 209, 139),
        11 => Rgb::new(245, 245, 67),
        12 => Rgb::new(59, 142, 234),
        13 => Rgb::new(214, 112, 214),
        14 => Rgb::new(41, 184, 219),
        15 => Rgb::new(255, 255, 255),
        _ => return None,
    };
    Some(rgb)
}

fn query_terminal() -> Option<Rgb> {
    // The reply arrives on stdin, which must not be the document
    if !stdout_is_tty() || stdin_is_piped() || !std::io::stdin().is_terminal() {
        return None;
    }

    match termbg::rgb(QUERY_TIMEOUT) {
        Ok(termbg::Rgb { r, g, b }) => {
            let rgb = Rgb::new(high_byte(r), high_byte(g), high_byte(b));
            debug!(?rgb, "background from terminal query");
            Some(rgb)
        }
        Err(e) => {
            debug!(error = %e, "terminal did not report its background");
            None
        }
    }
}

fn high_byte(channel: u16) -> u8 {
    (channel >> 8) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_luminance_bounds() {
        assert_eq!(Rgb::new(0, 0, 0).luminance(), 0.0);
        assert!((Rgb::new(255, 255, 255).luminance() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_is_light() {
        assert!(Rgb::new(255, 255, 255).is_light());
        assert!(Rgb::new(253, 246, 227).is_light());
        assert!(!Rgb::new(0, 0, 0).is_light());
        assert!(!Rgb::new(40, 42, 54).is_light());
        // Pure blue is dark despite the saturated channel
        assert!(!Rgb::new(0, 0, 255).is_light());
    }

    #[test]
    fn test_style_for_background() {
        assert_eq!(
            style_for_background(Some(Rgb::new(255, 255, 255))),
            NamedStyle::Light
        );
        assert_eq!(
            style_for_background(Some(Rgb::new(30, 30, 30))),
            NamedStyle::Dark
        );
        assert_eq!(style_for_background(None), NamedStyle::Dark);
    }

    #[test]
    fn test_parse_colorfgbg() {
        assert_eq!(parse_colorfgbg("0;15"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(parse_colorfgbg("15;0"), Some(Rgb::new(0, 0, 0)));
        assert_eq!(parse_colorfgbg("0;default;15"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(parse_colorfgbg("15"), None);
        assert_eq!(parse_colorfgbg("0;99"), None);
        assert_eq!(parse_colorfgbg("0;x"), None);
    }

    #[test]
    fn test_high_byte() {
        assert_eq!(high_byte(0xffff), 0xff);
        assert_eq!(high_byte(0x2828), 0x28);
        assert_eq!(high_byte(0x00ff), 0);
    }

    #[test]
    #[serial]
    fn test_detect_prefers_colorfgbg() {
        std::env::set_var("COLORFGBG", "0;15");
        std::env::set_var("TERM_PROGRAM", "WezTerm");
        assert_eq!(detect(), Some(Rgb::new(255, 255, 255)));

        std::env::set_var("COLORFGBG", "15;0");
        std::env::set_var("TERM_PROGRAM", "Apple_Terminal");
        assert_eq!(detect(), Some(Rgb::new(0, 0, 0)));

        std::env::remove_var("COLORFGBG");
        std::env::remove_var("TERM_PROGRAM");
    }

    #[test]
    #[serial]
    fn test_detect_apple_terminal_is_light() {
        std::env::remove_var("COLORFGBG");
        std::env::set_var("TERM_PROGRAM", "Apple_Terminal");
        assert_eq!(style_for_background(detect()), NamedStyle::Light);
        std::env::remove_var("TERM_PROGRAM");
    }
}
