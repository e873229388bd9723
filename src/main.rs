mod cli;
mod config;
mod display;
mod error;
mod reader;

use std::ffi::OsString;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Input, Mode};
use crate::config::Config;
use crate::display::terminal;
use crate::error::Result;

#[derive(Parser)]
#[command(name = "marko")]
#[command(about = "Read markdown in the terminal or in a local browser reader", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Markdown file, `-` for stdin, and the `-t`/`--term` flag
    #[arg(num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

impl Cli {
    /// Parse with every user argument kept as a raw value
    ///
    /// A leading `--` is inserted so clap's own escape handling never
    /// swallows a `--` the user typed.
    fn parse_raw<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut raw = raw.into_iter();
        let bin = raw.next();
        Self::parse_from(
            bin.into_iter()
                .chain(std::iter::once(OsString::from("--")))
                .chain(raw),
        )
    }
}

fn main() {
    let cli = Cli::parse_raw(std::env::args_os());
    init_tracing();

    if let Err(e) = run(cli.args) {
        eprintln!("marko: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MARKO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(args: Vec<String>) -> Result<()> {
    let (mode, args) = cli::select_mode(args);
    tracing::debug!(?mode, ?args, "parsed arguments");

    let stdin = std::io::stdin();
    let markdown = match cli::resolve(&args, stdin.lock(), terminal::stdin_is_piped())? {
        Input::Usage => {
            println!("{}", cli::USAGE);
            return Ok(());
        }
        Input::Version => {
            println!("marko {}", cli::VERSION);
            return Ok(());
        }
        Input::Markdown(bytes) => bytes,
    };
    let markdown = String::from_utf8_lossy(&markdown);

    match mode {
        Mode::Terminal => display::show(&markdown, &Config::from_env()),
        Mode::Reader => reader::open(&markdown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &[&str]) -> Vec<String> {
        Cli::parse_raw(raw.iter().map(OsString::from)).args
    }

    #[test]
    fn test_no_arguments() {
        assert!(parse(&["marko"]).is_empty());
    }

    #[test]
    fn test_double_dash_is_kept_as_argument() {
        assert_eq!(parse(&["marko", "--", "a.md"]), ["--", "a.md"]);
        assert_eq!(parse(&["marko", "-t", "--"]), ["-t", "--"]);
    }

    #[test]
    fn test_flags_keep_their_order() {
        assert_eq!(
            parse(&["marko", "a.md", "--help", "-t"]),
            ["a.md", "--help", "-t"]
        );
    }
}
