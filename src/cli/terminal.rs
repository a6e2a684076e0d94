//! Coloured output for the terminal.
//!
//! Styling is only applied when stdout supports colour, so piped output
//! stays plain.

use owo_colors::{OwoColorize, Style};

fn paint(text: &str, style: Style) -> String {
    if supports_color::on(supports_color::Stream::Stdout).is_some() {
        text.style(style).to_string()
    } else {
        text.to_owned()
    }
}

/// Styles for the kinds of message the CLI prints.
pub trait Colorize {
    /// A completed change (green)
    fn success(&self) -> String;
    /// Something the user should act on, such as an item running out (bold
    /// yellow)
    fn warning(&self) -> String;
    /// Secondary detail
    fn dim(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        paint(self.as_ref(), Style::new().green())
    }

    fn warning(&self) -> String {
        paint(self.as_ref(), Style::new().yellow().bold())
    }

    fn dim(&self) -> String {
        paint(self.as_ref(), Style::new().dimmed())
    }
}
