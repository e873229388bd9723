use std::fs;
use std::io::Read;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{MarkoError, Result};

/// What the arguments ask for
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    /// Non-empty markdown source
    Markdown(Vec<u8>),
    Usage,
    Version,
}

/// Resolve the markdown source from positional arguments
///
/// Help and version win when they are the first argument, regardless of
/// what follows. `-` and an empty argument list with piped stdin read
/// stdin; otherwise exactly one file path is expected.
pub fn resolve<R: Read>(args: &[String], stdin: R, stdin_piped: bool) -> Result<Input> {
    let Some(first) = args.first() else {
        if stdin_piped {
            debug!("reading piped stdin");
            return read_stdin(stdin).map(Input::Markdown);
        }
        return Ok(Input::Usage);
    };

    match first.as_str() {
        "--help" | "-h" => return Ok(Input::Usage),
        "--version" | "-v" => return Ok(Input::Version),
        "-" => return read_stdin(stdin).map(Input::Markdown),
        _ => {}
    }

    if args.len() > 1 {
        return Err(MarkoError::TooManyArguments);
    }

    read_file(PathBuf::from(first)).map(Input::Markdown)
}

fn read_stdin<R: Read>(mut stdin: R) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    stdin.read_to_end(&mut data)?;

    if data.is_empty() {
        return Err(MarkoError::EmptyInput("stdin".to_string()));
    }
    Ok(data)
}

fn read_file(path: PathBuf) -> Result<Vec<u8>> {
    debug!(path = %path.display(), "reading markdown file");
    let data = match fs::read(&path) {
        Ok(data) => data,
        Err(source) => return Err(MarkoError::Read { path, source }),
    };

    if data.is_empty() {
        return Err(MarkoError::EmptyInput(path.display().to_string()));
    }
    Ok(data)
}
