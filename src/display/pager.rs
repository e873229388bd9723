//! Output policy: print directly or through the pager

use std::io::{self, Write};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;

/// Where rendered text goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPath {
    Direct,
    Pager,
}

/// Page only when writing to a terminal and the text does not fit on screen
pub fn choose_output(rendered: &str, stdout_is_tty: bool, height: usize) -> OutputPath {
    if !stdout_is_tty {
        return OutputPath::Direct;
    }

    let lines = rendered.matches('\n').count();
    if lines <= height {
        OutputPath::Direct
    } else {
        OutputPath::Pager
    }
}

/// Write rendered text along the chosen path
///
/// A pager that cannot be started or exits unsuccessfully degrades to
/// writing the text to `out`.
pub fn present<W: Write>(
    rendered: &str,
    path: OutputPath,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    if path == OutputPath::Pager {
        match run_pager(rendered, config) {
            Ok(()) => return Ok(()),
            Err(e) => warn!(pager = %config.pager, error = %e, "pager failed, printing directly"),
        }
    }

    out.write_all(rendered.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn run_pager(content: &str, config: &Config) -> io::Result<()> {
    let (program, args) = config
        .pager_command()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty pager command"))?;

    debug!(program, ?args, "starting pager");
    let mut child = Command::new(program)
        .args(&args)
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()?;

    let fed = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(content.as_bytes()),
        None => Ok(()),
    };

    let status = child.wait()?;

    // The pager may quit before reading everything
    match fed {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e),
        _ => {}
    }

    if !status.success() {
        return Err(io::Error::other(format!("pager exited with {}", status)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager(command: &str) -> Config {
        Config {
            pager: command.to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_not_a_tty_prints_directly() {
        let tall = "line\n".repeat(500);
        assert_eq!(choose_output(&tall, false, 24), OutputPath::Direct);
    }

    #[test]
    fn test_fits_on_screen_prints_directly() {
        let text = "line\n".repeat(24);
        assert_eq!(choose_output(&text, true, 24), OutputPath::Direct);
    }

    #[test]
    fn test_overflow_uses_pager() {
        let text = "line\n".repeat(25);
        assert_eq!(choose_output(&text, true, 24), OutputPath::Pager);
    }

    #[test]
    fn test_direct_writes_text() {
        let mut out = Vec::new();
        present("hello\n", OutputPath::Direct, &Config::default(), &mut out).unwrap();
        assert_eq!(out, b"hello\n");
    }

    #[test]
    fn test_missing_pager_falls_back() {
        let mut out = Vec::new();
        let config = pager("marko-test-no-such-pager --flag");
        present("rendered\n", OutputPath::Pager, &config, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "rendered\n");
    }

    #[test]
    fn test_blank_pager_falls_back() {
        let mut out = Vec::new();
        present("rendered\n", OutputPath::Pager, &pager("  "), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "rendered\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_pager_falls_back() {
        let mut out = Vec::new();
        present("rendered\n", OutputPath::Pager, &pager("false"), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "rendered\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_pager_consumes_text() {
        let mut out = Vec::new();
        present("rendered\n", OutputPath::Pager, &pager("true"), &mut out).unwrap();
        assert!(out.is_empty());
    }
}
