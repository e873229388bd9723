/// Rendering mode for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Serve the page to the browser
    #[default]
    Reader,
    /// Render with ANSI styling in the terminal
    Terminal,
}

/// Split the terminal flag out of the arguments
///
/// The flag may appear anywhere; everything else is returned in order.
pub fn select_mode(args: Vec<String>) -> (Mode, Vec<String>) {
    let (flags, rest): (Vec<String>, Vec<String>) = args
        .into_iter()
        .partition(|arg| arg == "-t" || arg == "--term");

    let mode = if flags.is_empty() {
        Mode::Reader
    } else {
        Mode::Terminal
    };

    (mode, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_no_flag_is_reader() {
        let (mode, rest) = select_mode(args(&["notes.md"]));
        assert_eq!(mode, Mode::Reader);
        assert_eq!(rest, args(&["notes.md"]));
    }

    #[test]
    fn test_short_flag_before_file() {
        let (mode, rest) = select_mode(args(&["-t", "notes.md"]));
        assert_eq!(mode, Mode::Terminal);
        assert_eq!(rest, args(&["notes.md"]));
    }

    #[test]
    fn test_long_flag_after_file() {
        let (mode, rest) = select_mode(args(&["notes.md", "--term"]));
        assert_eq!(mode, Mode::Terminal);
        assert_eq!(rest, args(&["notes.md"]));
    }

    #[test]
    fn test_other_arguments_keep_order() {
        let (mode, rest) = select_mode(args(&["a.md", "-t", "-", "--help", "-t"]));
        assert_eq!(mode, Mode::Terminal);
        assert_eq!(rest, args(&["a.md", "-", "--help"]));
    }

    #[test]
    fn test_empty_arguments() {
        let (mode, rest) = select_mode(Vec::new());
        assert_eq!(mode, Mode::Reader);
        assert!(rest.is_empty());
    }
}
