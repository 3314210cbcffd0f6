//! aicmd - An AI-powered shell command suggester.
//!
//! Describe a task in natural language; aicmd asks a chat-completion
//! service for candidate shell commands, lets you pick or edit one, and
//! runs it after confirmation.

mod config;
mod exec;
mod history;
mod select;
mod session;
mod style;
mod suggest;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use history::{Input, Prompter};
use session::Session;
use std::process::ExitCode;
use style::TextStyler;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aicmd")]
#[command(author, version, about = "An AI-powered shell command suggester")]
#[command(
    long_about = "Describe a task in natural language and pick from suggested shell commands.\n\n\
                  Run with no arguments for interactive mode; type /bye to leave it."
)]
struct Cli {
    /// Natural-language task description (all words are joined into one query)
    #[arg(value_name = "QUERY")]
    query: Vec<String>,

    /// Configure the API key, model, and suggestion count
    #[arg(long)]
    setup: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("aicmd=warn".parse().unwrap())
                .add_directive("reqwest=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let styler = style::for_terminal();

    if cli.setup {
        run_setup(styler.as_ref())?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load_or_init().context("Failed to load configuration")?;
    let mut session = Session::new(&config, styler)?;

    let query = cli.query.join(" ");
    if query.trim().is_empty() {
        session.run_interactive().await?;
        Ok(ExitCode::SUCCESS)
    } else {
        let code = session.run_once(Some(query)).await?;
        Ok(ExitCode::from(code.clamp(0, 255) as u8))
    }
}

/// Interactive configuration flow.
///
/// Shows each current value as the default; a blank answer keeps it. An
/// interrupt at any prompt leaves the file untouched.
fn run_setup(styler: &dyn TextStyler) -> Result<()> {
    let mut config = Config::load_or_init().context("Failed to load configuration")?;
    let mut prompter = Prompter::new()?;

    let Some(api_key) = prompt_field(
        &mut prompter,
        &format!("DeepSeek API key [{}]: ", config.api_key),
    )?
    else {
        println!("{}", styler.notice("Setup cancelled."));
        return Ok(());
    };
    if !api_key.is_empty() {
        config.api_key = api_key;
    }

    let Some(model) = prompt_field(&mut prompter, &format!("Model name [{}]: ", config.model))?
    else {
        println!("{}", styler.notice("Setup cancelled."));
        return Ok(());
    };
    if !model.is_empty() {
        config.model = model;
    }

    let Some(max_suggestions) = prompt_field(
        &mut prompter,
        &format!("Maximum suggestions [{}]: ", config.max_suggestions),
    )?
    else {
        println!("{}", styler.notice("Setup cancelled."));
        return Ok(());
    };
    if !max_suggestions.is_empty() {
        match max_suggestions.parse::<u32>() {
            Ok(n) if n >= 1 => config.max_suggestions = n,
            _ => println!(
                "{}",
                styler.alert("Invalid number for max suggestions; keeping current value.")
            ),
        }
    }

    config.save()?;
    println!("{}", styler.success("Configuration saved."));
    Ok(())
}

/// Read one setup answer; `None` means the user interrupted.
fn prompt_field(prompter: &mut Prompter, label: &str) -> Result<Option<String>> {
    match prompter.read_line(label)? {
        Input::Line(line) => Ok(Some(line.trim().to_string())),
        Input::Interrupted | Input::Eof => Ok(None),
    }
}
