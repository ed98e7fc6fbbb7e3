//! Colored terminal output.
//!
//! Uses `termcolor` so reports can go to a terminal, a pipe or an in-memory
//! buffer alike. Respects the `NO_COLOR` environment variable and the
//! `--color` flag.

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, WriteColor};

/// Resolve `ColorChoice` from CLI flag and environment.
///
/// Priority: `NO_COLOR` env > `--color` flag > auto-detect TTY.
pub fn resolve_color_choice(flag: Option<&str>) -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    choice_from_flag(flag)
}

fn choice_from_flag(flag: Option<&str>) -> ColorChoice {
    match flag {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// Styles used by the help report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Box borders
    Border,
    /// Inspected value's name
    Title,
    /// `type:` / `value:` labels
    Label,
    /// Member help lines
    Member,
    /// Callable signature lines
    Signature,
}

impl Style {
    fn spec(self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self {
            Style::Border => {
                spec.set_fg(Some(Color::White));
            }
            Style::Title => {
                spec.set_bold(true);
            }
            Style::Label => {
                spec.set_fg(Some(Color::Cyan));
            }
            Style::Member => {}
            Style::Signature => {
                spec.set_fg(Some(Color::Green));
            }
        }
        spec
    }
}

/// Write text in a style, resetting afterwards.
pub fn write_styled<W: WriteColor + ?Sized>(out: &mut W, text: &str, style: Style) -> io::Result<()> {
    out.set_color(&style.spec())?;
    write!(out, "{}", text)?;
    out.reset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::Buffer;

    #[test]
    fn test_choice_from_flag() {
        assert_eq!(choice_from_flag(Some("always")), ColorChoice::Always);
        assert_eq!(choice_from_flag(Some("never")), ColorChoice::Never);
        assert_eq!(choice_from_flag(Some("auto")), ColorChoice::Auto);
        assert_eq!(choice_from_flag(None), ColorChoice::Auto);
    }

    #[test]
    fn test_plain_buffer_has_no_escapes() {
        let mut buf = Buffer::no_color();
        write_styled(&mut buf, "hello", Style::Title).unwrap();
        assert_eq!(String::from_utf8(buf.into_inner()).unwrap(), "hello");
    }

    #[test]
    fn test_ansi_buffer_wraps_text() {
        let mut buf = Buffer::ansi();
        write_styled(&mut buf, "sig", Style::Signature).unwrap();
        let text = String::from_utf8(buf.into_inner()).unwrap();
        assert!(text.contains("sig"));
        assert!(text.starts_with("\x1b["));
    }
}
