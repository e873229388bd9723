//! Command-line interface module
//!
//! Argument handling happens in two passes over the raw arguments:
//! - mode: pull out `-t`/`--term` wherever it appears
//! - input: pick the markdown source from what remains, or short-circuit
//!   to usage/version

mod input;
mod mode;

pub use input::{resolve, Input};
pub use mode::{select_mode, Mode};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "marko: a terminal markdown reader

Usage:
  marko <file.md>       Open in visual reader (default)
  marko -t <file.md>    Render markdown in terminal
  marko -               Read from stdin
  cat file | marko      Pipe markdown to stdin

Options:
  -t, --term    Render in terminal instead of visual reader
  --help        Show this help
  --version     Show version

Environment:
  GLAMOUR_STYLE   Set terminal rendering style (dark, light, notty, dracula, ascii)
                  or a path to a TOML style sheet
  PAGER           Set pager command (default: less -r)
  MARKO_LOG       Set log filter (default: warn)";
