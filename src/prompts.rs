//! dialoguer-backed prompts shared by the views.

use anyhow::{Context, Result};
use dialoguer::{Confirm, Input};
use mycal_core::MycalError;
use mycal_core::MycalResult;
use mycal_core::editor::Prompter;
use mycal_core::validation::ValidationError;
use owo_colors::OwoColorize;

/// Answers the event editor's questions on the terminal.
#[derive(Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str, initial: &str) -> MycalResult<Option<String>> {
        // Clearing the text and pressing enter counts as cancel.
        let answer: String = Input::new()
            .with_prompt(format!("  {prompt}"))
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| MycalError::Prompt(e.to_string()))?;

        Ok((!answer.is_empty()).then_some(answer))
    }

    fn confirm(&mut self, prompt: &str) -> MycalResult<bool> {
        let answer = Confirm::new()
            .with_prompt(format!("  {prompt}"))
            .default(false)
            .interact_opt()
            .map_err(|e| MycalError::Prompt(e.to_string()))?;

        Ok(answer.unwrap_or(false))
    }
}

/// Prompt for a line of text. Empty input is allowed so the form
/// validation can report it.
pub fn prompt_text(label: &str, initial: &str) -> Result<String> {
    Input::new()
        .with_prompt(format!("  {label}"))
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .with_context(|| format!("Failed to read {label}"))
}

/// Prompt for password input (hidden).
pub fn prompt_password(label: &str) -> Result<String> {
    let prompt = format!("  {}: ", label);
    rpassword::prompt_password(&prompt).context("Failed to read password")
}

/// Show a blocking-style alert line.
pub fn alert(message: &str) {
    eprintln!("  {}", message.red());
}

pub fn success(message: &str) {
    println!("  {}", message.green());
}

/// Print each failed field under the form.
pub fn show_field_errors(errors: &[ValidationError]) {
    for error in errors {
        eprintln!("    {} {}", format!("{}:", error.field).dimmed(), error.message.red());
    }
}
