//! Terminal text styling.
//!
//! A small capability trait so the rest of the tool never checks whether
//! color is available: `AnsiStyler` for interactive terminals, and
//! `PlainStyler` passing text through untouched for pipes and dumb
//! terminals. Picked once at startup.

use crossterm::style::Stylize;

/// Styling roles used by the tool's output.
pub trait TextStyler {
    /// Prompts and section headers.
    fn heading(&self, text: &str) -> String;
    /// A shell command being shown or echoed.
    fn command(&self, text: &str) -> String;
    /// Progress notes and cancellation notices.
    fn notice(&self, text: &str) -> String;
    /// Errors and failed outcomes.
    fn alert(&self, text: &str) -> String;
    /// Successful outcomes.
    fn success(&self, text: &str) -> String;
}

/// ANSI-colored output via crossterm.
pub struct AnsiStyler;

impl TextStyler for AnsiStyler {
    fn heading(&self, text: &str) -> String {
        text.cyan().to_string()
    }

    fn command(&self, text: &str) -> String {
        text.green().to_string()
    }

    fn notice(&self, text: &str) -> String {
        text.yellow().to_string()
    }

    fn alert(&self, text: &str) -> String {
        text.red().to_string()
    }

    fn success(&self, text: &str) -> String {
        text.green().bold().to_string()
    }
}

/// Pass-through styling for non-tty output.
pub struct PlainStyler;

impl TextStyler for PlainStyler {
    fn heading(&self, text: &str) -> String {
        text.to_string()
    }

    fn command(&self, text: &str) -> String {
        text.to_string()
    }

    fn notice(&self, text: &str) -> String {
        text.to_string()
    }

    fn alert(&self, text: &str) -> String {
        text.to_string()
    }

    fn success(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Pick a styler for the current stdout.
pub fn for_terminal() -> Box<dyn TextStyler> {
    if atty::is(atty::Stream::Stdout) {
        Box::new(AnsiStyler)
    } else {
        Box::new(PlainStyler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_is_identity() {
        let styler = PlainStyler;
        assert_eq!(styler.heading("hello"), "hello");
        assert_eq!(styler.alert("oops"), "oops");
        assert_eq!(styler.command("ls -la"), "ls -la");
    }

    #[test]
    fn test_ansi_embeds_text() {
        let styler = AnsiStyler;
        let styled = styler.command("ls -la");
        assert!(styled.contains("ls -la"));
        assert_ne!(styled, "ls -la");
    }
}
