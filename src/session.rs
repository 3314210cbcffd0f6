//! The query → suggest → select → execute cycle.
//!
//! One [`Session`] drives both entry modes: a single-shot run for a query
//! given on the command line, and the interactive loop that keeps asking
//! for tasks until the `/bye` sentinel (or an interrupt) ends it.

use crate::config::Config;
use crate::exec;
use crate::history::{Input, Prompter};
use crate::select;
use crate::style::TextStyler;
use crate::suggest::SuggestionClient;
use anyhow::Result;
use tracing::info;

const QUERY_PROMPT: &str = "What do you want to do? ";
const EXIT_SENTINEL: &str = "/bye";

/// Whether an interactive input line ends the session.
fn is_exit_line(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(EXIT_SENTINEL)
}

/// An interactive assistant session.
pub struct Session {
    prompter: Prompter,
    client: SuggestionClient,
    styler: Box<dyn TextStyler>,
}

impl Session {
    /// Build a session from loaded configuration.
    pub fn new(config: &Config, styler: Box<dyn TextStyler>) -> Result<Self> {
        Ok(Self {
            prompter: Prompter::new()?,
            client: SuggestionClient::new(config),
            styler,
        })
    }

    /// Run exactly one cycle for a query from the command line, or from a
    /// single prompt if none was given. Returns the process exit code.
    pub async fn run_once(&mut self, query: Option<String>) -> Result<i32> {
        let query = match query {
            Some(q) => q,
            None => match self.prompter.read_line(&self.styler.heading(QUERY_PROMPT))? {
                Input::Line(line) => {
                    if !line.trim().is_empty() {
                        self.prompter.remember(line.trim());
                    }
                    line
                }
                Input::Interrupted | Input::Eof => {
                    println!("{}", self.styler.notice("Operation cancelled."));
                    return Ok(0);
                }
            },
        };

        let query = query.trim();
        if query.is_empty() {
            return Ok(0);
        }

        self.run_cycle(query).await
    }

    /// Run the interactive loop until `/bye`, EOF, or an interrupt.
    pub async fn run_interactive(&mut self) -> Result<()> {
        println!(
            "{} Type {} to exit.",
            self.styler.heading("Welcome to aicmd!"),
            self.styler.notice(EXIT_SENTINEL)
        );

        loop {
            let line = match self.prompter.read_line(&self.styler.heading(QUERY_PROMPT))? {
                Input::Line(line) => line,
                Input::Interrupted | Input::Eof => {
                    println!("{}", self.styler.notice("Goodbye!"));
                    break;
                }
            };

            if is_exit_line(&line) {
                println!("{}", self.styler.notice("Goodbye!"));
                break;
            }

            let query = line.trim().to_string();
            if query.is_empty() {
                continue;
            }

            self.prompter.remember(&query);
            self.run_cycle(&query).await?;
        }

        Ok(())
    }

    /// One full suggest → select → execute → persist-history cycle.
    ///
    /// Fetch failures are reported and downgraded to an empty suggestion
    /// list; history is saved even when nothing was executed.
    async fn run_cycle(&mut self, query: &str) -> Result<i32> {
        info!("Query: {}", query);
        println!(
            "{}",
            self.styler.notice("Searching for command suggestions...")
        );

        let suggestions = match self.client.suggestions(query).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                eprintln!("{}", self.styler.alert(&e.to_string()));
                Vec::new()
            }
        };

        let chosen = select::select(&mut self.prompter, self.styler.as_ref(), &suggestions)?;

        let code = match chosen {
            Some(command) => exec::execute(&mut self.prompter, self.styler.as_ref(), &command)?,
            None => 0,
        };

        self.prompter.save_history();
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_sentinel_variants() {
        assert!(is_exit_line("/bye"));
        assert!(is_exit_line("/BYE"));
        assert!(is_exit_line("/Bye "));
        assert!(is_exit_line("  /bye"));
    }

    #[test]
    fn test_non_sentinel_lines() {
        assert!(!is_exit_line("bye"));
        assert!(!is_exit_line("/byebye"));
        assert!(!is_exit_line(""));
        assert!(!is_exit_line("compress this directory"));
    }
}
