//! Markdown terminal formatting using termimad

use std::borrow::Cow;
use std::path::Path;

use termimad::crossterm::style::{Attribute, Color};
use termimad::{gray, MadSkin, StyledChar};
use tracing::debug;

use crate::config::{self, NamedStyle, StyleSheet};
use crate::display::background;
use crate::display::terminal::should_use_colors;
use crate::error::{MarkoError, Result};

/// Terminal style used to render markdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Theme {
    Named(NamedStyle),
    Custom(StyleSheet),
}

impl Theme {
    /// Resolve a `GLAMOUR_STYLE` value
    ///
    /// `auto` picks `notty` without color support, otherwise `light` or
    /// `dark` from the terminal background. Built-in names map to their
    /// style, anything else is read as a style sheet path.
    pub fn resolve(style: &str) -> Result<Self> {
        if style.eq_ignore_ascii_case("auto") {
            let named = if should_use_colors() {
                background::style_for_background(background::detect())
            } else {
                NamedStyle::NoTty
            };
            debug!(?named, "auto-detected terminal style");
            return Ok(Theme::Named(named));
        }

        if let Some(named) = NamedStyle::from_name(style) {
            return Ok(Theme::Named(named));
        }

        debug!(path = style, "loading style sheet");
        config::load_style_sheet(Path::new(style)).map(Theme::Custom)
    }

    /// Build the termimad skin for this theme
    pub fn skin(&self) -> Result<MadSkin> {
        match self {
            Theme::Named(named) => Ok(named_skin(*named)),
            Theme::Custom(sheet) => sheet_skin(sheet),
        }
    }
}

/// Render markdown to a styled string wrapped at `width` columns
pub fn render(markdown: &str, width: usize, theme: &Theme) -> Result<String> {
    let skin = theme.skin()?;
    let markdown = expand_shortcodes(markdown);
    Ok(skin.text(&markdown, Some(width)).to_string())
}

/// Replace `:name:` emoji shortcodes outside fenced code blocks
///
/// Unknown names are left as typed.
pub fn expand_shortcodes(markdown: &str) -> Cow<'_, str> {
    if !markdown.contains(':') {
        return Cow::Borrowed(markdown);
    }

    let mut out = String::with_capacity(markdown.len());
    let mut fence: Option<&str> = None;
    for line in markdown.split_inclusive('\n') {
        let marker = fence_marker(line);
        match (fence, marker) {
            (None, Some(open)) => {
                fence = Some(open);
                out.push_str(line);
            }
            (Some(open), Some(close)) if close.starts_with(open) => {
                fence = None;
                out.push_str(line);
            }
            (Some(_), _) => out.push_str(line),
            (None, None) => expand_line(line, &mut out),
        }
    }
    Cow::Owned(out)
}

/// Leading run of backticks or tildes opening or closing a code fence
fn fence_marker(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let ch = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.find(|c| c != ch).unwrap_or(trimmed.len());
    (len >= 3).then(|| &trimmed[..len])
}

fn expand_line(line: &str, out: &mut String) {
    let mut rest = line;
    while let Some(start) = rest.find(':') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let name_len = after
            .find(|c: char| !is_shortcode_char(c))
            .unwrap_or(after.len());
        let name = &after[..name_len];

        let emoji = if name_len > 0 && after[name_len..].starts_with(':') {
            emojis::get_by_shortcode(name)
        } else {
            None
        };
        match emoji {
            Some(emoji) => {
                out.push_str(emoji.as_str());
                rest = &after[name_len + 1..];
            }
            None => {
                out.push(':');
                rest = after;
            }
        }
    }
    out.push_str(rest);
}

fn is_shortcode_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-')
}

fn named_skin(named: NamedStyle) -> MadSkin {
    match named {
        NamedStyle::Dark => {
            let mut skin = MadSkin::default_dark();
            customize_dark(&mut skin);
            skin
        }
        NamedStyle::Light => {
            let mut skin = MadSkin::default_light();
            customize_light(&mut skin);
            skin
        }
        NamedStyle::Dracula => {
            let mut skin = MadSkin::default_dark();
            customize_dracula(&mut skin);
            skin
        }
        NamedStyle::NoTty => MadSkin::no_style(),
        NamedStyle::Ascii => {
            let mut skin = MadSkin::no_style();
            skin.bullet = StyledChar::nude('*');
            skin.quote_mark = StyledChar::nude('|');
            skin.horizontal_rule = StyledChar::nude('-');
            skin
        }
    }
}

/// Bullet color of each built-in style, reused when a sheet swaps the glyph
fn bullet_color(named: NamedStyle) -> Option<Color> {
    match named {
        NamedStyle::Dark => Some(Color::Cyan),
        NamedStyle::Light => Some(Color::DarkCyan),
        NamedStyle::Dracula => Some(DRACULA_CYAN),
        NamedStyle::NoTty | NamedStyle::Ascii => None,
    }
}

fn customize_dark(skin: &mut MadSkin) {
    use Color::*;

    // Headers: Bold cyan/blue
    skin.headers[0].set_fg(Cyan);
    skin.headers[0].add_attr(Attribute::Bold);
    skin.headers[1].set_fg(Blue);
    skin.headers[1].add_attr(Attribute::Bold);
    skin.headers[2].set_fg(Blue);

    // Code blocks: Green with gray background
    skin.code_block.set_bg(gray(2));
    skin.code_block.set_fg(Green);

    skin.inline_code.set_fg(Yellow);
    skin.table.set_fg(White);

    skin.bold.add_attr(Attribute::Bold);
    skin.italic.add_attr(Attribute::Italic);

    skin.bullet = StyledChar::from_fg_char(Cyan, '•');
}

fn customize_light(skin: &mut MadSkin) {
    use Color::*;

    skin.headers[0].set_fg(DarkBlue);
    skin.headers[0].add_attr(Attribute::Bold);
    skin.headers[1].set_fg(DarkCyan);
    skin.headers[1].add_attr(Attribute::Bold);
    skin.headers[2].set_fg(DarkCyan);

    skin.code_block.set_bg(gray(21));
    skin.code_block.set_fg(DarkGreen);

    skin.inline_code.set_fg(DarkMagenta);
    skin.table.set_fg(Black);

    skin.bold.add_attr(Attribute::Bold);
    skin.italic.add_attr(Attribute::Italic);

    skin.bullet = StyledChar::from_fg_char(DarkCyan, '•');
}

const DRACULA_PURPLE: Color = Color::Rgb { r: 189, g: 147, b: 249 };
const DRACULA_PINK: Color = Color::Rgb { r: 255, g: 121, b: 198 };
const DRACULA_GREEN: Color = Color::Rgb { r: 80, g: 250, b: 123 };
const DRACULA_YELLOW: Color = Color::Rgb { r: 241, g: 250, b: 140 };
const DRACULA_CYAN: Color = Color::Rgb { r: 139, g: 233, b: 253 };
const DRACULA_BACKGROUND: Color = Color::Rgb { r: 40, g: 42, b: 54 };

fn customize_dracula(skin: &mut MadSkin) {
    for header in skin.headers.iter_mut() {
        header.set_fg(DRACULA_PURPLE);
    }
    skin.headers[0].add_attr(Attribute::Bold);
    skin.headers[1].add_attr(Attribute::Bold);

    skin.code_block.set_bg(DRACULA_BACKGROUND);
    skin.code_block.set_fg(DRACULA_GREEN);

    skin.inline_code.set_fg(DRACULA_GREEN);

    skin.bold.set_fg(DRACULA_PINK);
    skin.bold.add_attr(Attribute::Bold);
    skin.italic.set_fg(DRACULA_YELLOW);
    skin.italic.add_attr(Attribute::Italic);

    skin.bullet = StyledChar::from_fg_char(DRACULA_CYAN, '•');
}

fn sheet_skin(sheet: &StyleSheet) -> Result<MadSkin> {
    let mut skin = named_skin(sheet.base);

    for (header, color) in skin.headers.iter_mut().zip(&sheet.headers) {
        header.set_fg(parse_color(color)?);
    }
    if let Some(color) = &sheet.bold {
        skin.bold.set_fg(parse_color(color)?);
    }
    if let Some(color) = &sheet.italic {
        skin.italic.set_fg(parse_color(color)?);
    }
    if let Some(color) = &sheet.inline_code {
        skin.inline_code.set_fg(parse_color(color)?);
    }
    if let Some(color) = &sheet.code_block_bg {
        skin.code_block.set_bg(parse_color(color)?);
    }
    if let Some(bullet) = sheet.bullet {
        skin.bullet = match bullet_color(sheet.base) {
            Some(fg) => StyledChar::from_fg_char(fg, bullet),
            None => StyledChar::nude(bullet),
        };
    }

    Ok(skin)
}

/// Parse `#rrggbb`, an ANSI palette index, or a color name like `dark_blue`
fn parse_color(value: &str) -> Result<Color> {
    let invalid = || MarkoError::Render(format!("unknown color '{}'", value));
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        return Ok(Color::Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        });
    }

    if let Ok(index) = value.parse::<u8>() {
        return Ok(Color::AnsiValue(index));
    }

    Color::try_from(value).map_err(|_| invalid())
}
