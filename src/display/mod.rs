//! Terminal display module
//!
//! Renders markdown with termimad at the terminal width and writes it
//! directly or through a pager depending on TTY status and content height.

mod background;
mod formatter;
mod pager;
pub mod terminal;

pub use formatter::{render, Theme};
pub use pager::{choose_output, present};

use tracing::debug;

use crate::config::Config;
use crate::error::Result;

/// Render markdown for the terminal and print it
pub fn show(markdown: &str, config: &Config) -> Result<()> {
    let width = terminal::terminal_width();
    let theme = Theme::resolve(&config.style)?;
    debug!(width, style = %config.style, "rendering for terminal");

    let rendered = render(markdown, width, &theme)?;

    let path = choose_output(
        &rendered,
        terminal::stdout_is_tty(),
        terminal::terminal_height(),
    );
    debug!(?path, "selected output path");

    present(&rendered, path, config, &mut std::io::stdout().lock())
}
