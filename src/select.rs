//! Suggestion selection prompt.
//!
//! Renders the candidate commands and reads a single decision: a 1-based
//! index, `e` to type a replacement command, or `c` to cancel. One
//! malformed attempt aborts the selection; there is no retry loop.

use crate::history::{Input, Prompter};
use crate::style::TextStyler;
use anyhow::Result;

/// Outcome of parsing the user's raw selection input.
#[derive(Debug, PartialEq, Eq)]
enum Choice {
    /// A valid 1-based index into the suggestion list.
    Index(usize),
    /// The user wants to type a replacement command.
    Edit,
    /// Explicit cancel.
    Cancel,
    /// Out-of-range or non-numeric input.
    Invalid,
}

/// Parse one line of selection input against a list of `len` suggestions.
fn parse_choice(input: &str, len: usize) -> Choice {
    let input = input.trim();
    if input.eq_ignore_ascii_case("c") {
        return Choice::Cancel;
    }
    if input.eq_ignore_ascii_case("e") {
        return Choice::Edit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Choice::Index(n),
        _ => Choice::Invalid,
    }
}

/// Display suggestions and let the user pick one.
///
/// Returns the chosen command, or `None` for every cancellation path:
/// empty list, explicit cancel, blank edit, invalid input, or interrupt.
pub fn select(
    prompter: &mut Prompter,
    styler: &dyn TextStyler,
    suggestions: &[String],
) -> Result<Option<String>> {
    if suggestions.is_empty() {
        println!("{}", styler.alert("No suggestions available."));
        return Ok(None);
    }

    println!("\n{}", styler.heading("Command suggestions:"));
    for (i, cmd) in suggestions.iter().enumerate() {
        println!(
            "{} {}",
            styler.notice(&format!("{}.", i + 1)),
            styler.command(cmd)
        );
    }

    let prompt = format!(
        "\n{}",
        styler.heading("Select a command to execute (number), edit (e), or cancel (c): ")
    );
    let line = match prompter.read_line(&prompt)? {
        Input::Line(line) => line,
        Input::Interrupted | Input::Eof => {
            println!("{}", styler.notice("Operation cancelled."));
            return Ok(None);
        }
    };

    match parse_choice(&line, suggestions.len()) {
        Choice::Index(n) => Ok(Some(suggestions[n - 1].clone())),
        Choice::Cancel => Ok(None),
        Choice::Edit => read_custom_command(prompter, styler),
        Choice::Invalid => {
            println!("{}", styler.alert("Invalid selection."));
            Ok(None)
        }
    }
}

/// Prompt for a free-text replacement command.
fn read_custom_command(
    prompter: &mut Prompter,
    styler: &dyn TextStyler,
) -> Result<Option<String>> {
    let prompt = styler.heading("Enter your custom command: ");
    match prompter.read_line(&prompt)? {
        Input::Line(line) => {
            let command = line.trim();
            if command.is_empty() {
                Ok(None)
            } else {
                prompter.remember(command);
                Ok(Some(command.to_string()))
            }
        }
        Input::Interrupted | Input::Eof => {
            println!("{}", styler.notice("Operation cancelled."));
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_case_insensitive() {
        assert_eq!(parse_choice("c", 5), Choice::Cancel);
        assert_eq!(parse_choice("C", 5), Choice::Cancel);
    }

    #[test]
    fn test_edit_is_case_insensitive() {
        assert_eq!(parse_choice("e", 5), Choice::Edit);
        assert_eq!(parse_choice("E", 5), Choice::Edit);
    }

    #[test]
    fn test_valid_index_bounds() {
        assert_eq!(parse_choice("1", 5), Choice::Index(1));
        assert_eq!(parse_choice("5", 5), Choice::Index(5));
        assert_eq!(parse_choice("3", 5), Choice::Index(3));
    }

    #[test]
    fn test_out_of_range_is_invalid_not_a_crash() {
        assert_eq!(parse_choice("0", 5), Choice::Invalid);
        assert_eq!(parse_choice("6", 5), Choice::Invalid);
    }

    #[test]
    fn test_non_numeric_is_invalid() {
        assert_eq!(parse_choice("abc", 5), Choice::Invalid);
        assert_eq!(parse_choice("-1", 5), Choice::Invalid);
        assert_eq!(parse_choice("", 5), Choice::Invalid);
    }

    #[test]
    fn test_surrounding_whitespace_tolerated() {
        assert_eq!(parse_choice(" 2 ", 5), Choice::Index(2));
        assert_eq!(parse_choice(" c ", 5), Choice::Cancel);
    }
}
