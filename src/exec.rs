//! Command execution with confirmation.
//!
//! Echoes the chosen command, asks for confirmation, then runs it through
//! the host shell with inherited stdio so its output streams live to the
//! terminal. The backtick strip mirrors the suggestion cleanup; it is not
//! a sandboxing guarantee.

use crate::history::{Input, Prompter};
use crate::style::TextStyler;
use anyhow::Result;
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Whether a confirmation response means "go ahead".
///
/// An empty response defaults to affirmative; anything other than a
/// case-insensitive `y` declines.
fn accepts_execution(response: &str) -> bool {
    let response = response.trim();
    response.is_empty() || response.eq_ignore_ascii_case("y")
}

/// Run `command` through the host shell, returning its exit status.
fn run_shell(command: &str) -> std::io::Result<ExitStatus> {
    if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", command]).status()
    } else {
        Command::new("sh").arg("-c").arg(command).status()
    }
}

/// Confirm and execute a command, returning the process exit code.
///
/// Declined or interrupted execution returns 0; a launch failure returns 1;
/// otherwise the subprocess's own exit code is passed through.
pub fn execute(prompter: &mut Prompter, styler: &dyn TextStyler, command: &str) -> Result<i32> {
    let command = command.replace('`', "");

    println!(
        "\n{} {}",
        styler.heading("Executing:"),
        styler.command(&command)
    );

    let confirmed = match prompter.read_line(&styler.notice("Proceed? (Y/n): "))? {
        Input::Line(response) => accepts_execution(&response),
        Input::Interrupted | Input::Eof => {
            println!("{}", styler.notice("Command execution cancelled."));
            return Ok(0);
        }
    };

    if !confirmed {
        println!("{}", styler.notice("Command execution cancelled."));
        return Ok(0);
    }

    println!("{}", styler.heading("Output:"));
    debug!("Running command: {}", command);

    match run_shell(&command) {
        Ok(status) => match status.code() {
            Some(0) => {
                println!("\n{}", styler.success("Command completed successfully."));
                Ok(0)
            }
            Some(code) => {
                println!(
                    "\n{}",
                    styler.alert(&format!("Command failed with exit code {}.", code))
                );
                Ok(code)
            }
            // Terminated by a signal (e.g. Ctrl-C): treat as cancellation.
            None => {
                println!("\n{}", styler.notice("Command execution cancelled."));
                Ok(0)
            }
        },
        Err(e) => {
            println!(
                "{}",
                styler.alert(&format!("Error executing command: {}", e))
            );
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response_is_affirmative() {
        assert!(accepts_execution(""));
        assert!(accepts_execution("   "));
    }

    #[test]
    fn test_y_is_affirmative() {
        assert!(accepts_execution("y"));
        assert!(accepts_execution("Y"));
        assert!(accepts_execution(" y "));
    }

    #[test]
    fn test_anything_else_declines() {
        assert!(!accepts_execution("n"));
        assert!(!accepts_execution("N"));
        assert!(!accepts_execution("yes"));
        assert!(!accepts_execution("q"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_shell_passes_exit_code_through() {
        let status = run_shell("exit 7").unwrap();
        assert_eq!(status.code(), Some(7));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_shell_success() {
        let status = run_shell("true").unwrap();
        assert_eq!(status.code(), Some(0));
    }
}
