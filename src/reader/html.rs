//! Markdown to HTML with GitHub Flavored Markdown extensions

use std::io::Cursor;

use comrak::plugins::syntect::{SyntectAdapter, SyntectAdapterBuilder};
use comrak::{markdown_to_html_with_plugins, Options, Plugins};
use syntect::highlighting::ThemeSet;
use tracing::warn;

/// Title used when the document has no level-1 heading line
pub const DEFAULT_TITLE: &str = "marko reader";

const HIGHLIGHT_THEME: &str = "Dracula";
const HIGHLIGHT_THEME_SOURCE: &[u8] = include_bytes!("dracula.tmTheme");

/// Used only if the bundled theme fails to load
const FALLBACK_THEME: &str = "base16-ocean.dark";

/// Render markdown to an HTML fragment
///
/// Enables tables, strikethrough, autolinks, task lists, emoji shortcodes,
/// heading anchors and highlighted code fences. Raw HTML in the source is
/// passed through.
pub fn render_html(markdown: &str) -> String {
    let adapter = highlighter();

    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.shortcodes = true;
    options.extension.header_ids = Some(String::new());
    options.render.unsafe_ = true;

    let mut plugins = Plugins::default();
    plugins.render.codefence_syntax_highlighter = Some(&adapter);

    markdown_to_html_with_plugins(markdown, &options, &plugins)
}

fn highlighter() -> SyntectAdapter {
    match ThemeSet::load_from_reader(&mut Cursor::new(HIGHLIGHT_THEME_SOURCE)) {
        Ok(theme) => {
            let mut themes = ThemeSet::new();
            themes.themes.insert(HIGHLIGHT_THEME.to_string(), theme);
            SyntectAdapterBuilder::new()
                .theme_set(themes)
                .theme(HIGHLIGHT_THEME)
                .build()
        }
        Err(e) => {
            warn!(error = %e, "bundled highlight theme failed to load");
            SyntectAdapter::new(Some(FALLBACK_THEME))
        }
    }
}

/// Text after `# ` on the first line that starts with it
pub fn extract_title(markdown: &str) -> String {
    markdown
        .split('\n')
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim_end_matches('\r').to_string())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}
