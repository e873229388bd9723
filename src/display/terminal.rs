//! TTY detection, terminal dimensions and color support logic

use std::io::IsTerminal;

use terminal_size::{terminal_size, Height, Width};

/// Widest wrap column, even on very wide terminals
pub const MAX_WIDTH: usize = 120;

/// Wrap column when the terminal width cannot be detected
pub const DEFAULT_WIDTH: usize = 80;

/// Page height when the terminal height cannot be detected
pub const DEFAULT_HEIGHT: usize = 24;

/// Whether stdin is a pipe or a regular file rather than a terminal or device
#[cfg(unix)]
pub fn stdin_is_piped() -> bool {
    use std::fs::File;
    use std::os::fd::AsFd;
    use std::os::unix::fs::FileTypeExt;

    let metadata = std::io::stdin()
        .as_fd()
        .try_clone_to_owned()
        .map(File::from)
        .and_then(|file| file.metadata());

    match metadata {
        Ok(metadata) => !metadata.file_type().is_char_device(),
        Err(_) => false,
    }
}

/// Whether stdin is a pipe or a regular file rather than a terminal or device
#[cfg(not(unix))]
pub fn stdin_is_piped() -> bool {
    !std::io::stdin().is_terminal()
}

pub fn stdout_is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Wrap column for terminal rendering
pub fn terminal_width() -> usize {
    wrap_width(terminal_size().map(|(Width(w), _)| w))
}

/// Number of rows that fit on screen before paging
pub fn terminal_height() -> usize {
    page_height(terminal_size().map(|(_, Height(h))| h))
}

fn wrap_width(detected: Option<u16>) -> usize {
    match detected {
        Some(w) if w > 0 => usize::from(w).min(MAX_WIDTH),
        _ => DEFAULT_WIDTH,
    }
}

fn page_height(detected: Option<u16>) -> usize {
    match detected {
        Some(h) if h > 0 => usize::from(h),
        _ => DEFAULT_HEIGHT,
    }
}

/// Determine if colors should be used based on environment and TTY status
pub fn should_use_colors() -> bool {
    // Priority order:
    // 1. NO_COLOR takes precedence (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // 2. CLICOLOR_FORCE enables colors even when piped
    if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if val != "0" {
            return true;
        }
    }

    // 3. CLICOLOR=0 disables colors
    if let Ok(val) = std::env::var("CLICOLOR") {
        if val == "0" {
            return false;
        }
    }

    // 4. Check if stdout is a TTY
    stdout_is_tty()
}
