//! Interactive prompts
//!
//! Reads the job role and experience level from the terminal. An empty line
//! or end of input selects the default value.

use crate::cli::commands::Cli;
use crate::error::{InterviewPrepError, Result};
use crate::pipeline::{SessionInput, DEFAULT_LEVEL, DEFAULT_ROLE};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const ROLE_PROMPT: &str = "Enter the job role (e.g., Python Developer): ";
const LEVEL_PROMPT: &str = "Enter experience level (e.g., Junior, Senior): ";

/// Line reader for the session prompts
pub struct Prompter {
    editor: DefaultEditor,
}

impl Prompter {
    /// Create a new prompter
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| {
            InterviewPrepError::Input(format!("Failed to initialize editor: {}", e))
        })?;
        Ok(Self { editor })
    }

    /// Ask one question, falling back to `default` on an empty answer
    pub fn ask(&mut self, prompt: &str, default: &str) -> Result<String> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(value_or_default(&line, default)),
            Err(ReadlineError::Eof) => Ok(default.to_string()),
            Err(ReadlineError::Interrupted) => {
                Err(InterviewPrepError::Input("Interrupted".to_string()))
            }
            Err(err) => Err(InterviewPrepError::Input(err.to_string())),
        }
    }
}

/// Trimmed line, or the default when nothing was typed
pub fn value_or_default(line: &str, default: &str) -> String {
    let line = line.trim();
    if line.is_empty() {
        default.to_string()
    } else {
        line.to_string()
    }
}

/// Build the session input from flags, prompting for whatever is missing
pub fn read_session_input(cli: &Cli) -> Result<SessionInput> {
    if let (Some(role), Some(level)) = (&cli.role, &cli.level) {
        return Ok(SessionInput::new(role.as_str(), level.as_str()));
    }

    let mut prompter = Prompter::new()?;
    let role = match &cli.role {
        Some(role) => role.clone(),
        None => prompter.ask(ROLE_PROMPT, DEFAULT_ROLE)?,
    };
    let level = match &cli.level {
        Some(level) => level.clone(),
        None => prompter.ask(LEVEL_PROMPT, DEFAULT_LEVEL)?,
    };

    Ok(SessionInput::new(role, level))
}
