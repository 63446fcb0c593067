//! Terminal rendering of scrollback lines.

use cforce_models::{Line, LineKind};
use crossterm::style::{Color, Stylize};

/// Color used for a line kind. `None` keeps the terminal default.
pub fn color(kind: LineKind) -> Option<Color> {
    match kind {
        LineKind::Input => Some(Color::Cyan),
        LineKind::System => Some(Color::Blue),
        LineKind::Success => Some(Color::Green),
        LineKind::Error => Some(Color::Red),
        LineKind::Warning => Some(Color::Yellow),
        LineKind::Plain => None,
    }
}

/// Renders a line with ANSI colors.
pub fn styled(line: &Line) -> String {
    match color(line.kind) {
        Some(color) if line.kind == LineKind::Input => {
            line.text.as_str().with(color).bold().to_string()
        }
        Some(color) => line.text.as_str().with(color).to_string(),
        None => line.text.clone(),
    }
}

/// Renders a line for a non-terminal sink.
pub fn plain(line: &Line) -> &str {
    &line.text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styled_keeps_text() {
        for kind in LineKind::ALL {
            let out = styled(&Line::new("text", kind));
            assert!(out.contains("text"), "{:?} lost its text", kind);
        }
        assert_eq!(styled(&Line::plain("text")), "text");
        assert_eq!(color(LineKind::Error), Some(Color::Red));
    }

    #[test]
    fn test_plain_is_raw_text() {
        let line = Line::error("[-] RHOSTS not set.");
        assert_eq!(plain(&line), "[-] RHOSTS not set.");
    }
}
