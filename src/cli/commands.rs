//! Command-line definitions and top-level handlers
//!
//! This module holds the argument parsers for both binaries and the
//! functions they call, including the single error-reporting boundary.

use crate::config::{Settings, API_KEY_ENV};
use crate::error::Result;
use crate::llm::{content_models, GenerationParams, LLMProvider};
use crate::pipeline::{AnswerMode, InterviewState, Pipeline, SessionInput};
use clap::Parser;
use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;

/// Greeting printed before the prompts
pub const WELCOME: &str = "Welcome to the AI Interview Prep Agent (Powered by Gemini)!";

/// Remediation hint printed after a failed run
pub const FAILURE_TIP: &str =
    "Tip: Make sure your GOOGLE_API_KEY is correct and you have internet access.";

/// Arguments for the interview pipeline binary
#[derive(Parser, Debug, Default)]
#[command(name = "interview-prep")]
#[command(author, version, about = "Generate interview questions and short answers with Gemini")]
#[command(long_about = r#"
Generates three interview questions for a job role and experience level,
then a short answer for each, and prints them.

The API key is read from GOOGLE_API_KEY (a local .env file is loaded first).
Settings are read from ~/.config/interview-prep/config.toml if present.

Example:
  interview-prep
  interview-prep --role "Rust Engineer" --level Senior --parallel
"#)]
pub struct Cli {
    /// Job role (prompted for when omitted)
    #[arg(short, long)]
    pub role: Option<String>,

    /// Experience level (prompted for when omitted)
    #[arg(short, long)]
    pub level: Option<String>,

    /// Model to use instead of the configured one
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Path to a config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Request all answers concurrently (output order is unchanged)
    #[arg(long)]
    pub parallel: bool,

    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn answer_mode(&self) -> AnswerMode {
        if self.parallel {
            AnswerMode::Concurrent
        } else {
            AnswerMode::Sequential
        }
    }
}

/// Arguments for the model listing binary
#[derive(Parser, Debug, Default)]
#[command(name = "list-models")]
#[command(author, version, about = "List Gemini models that support content generation")]
pub struct ListModelsCli {
    /// Path to a config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Print the missing-credential warning
pub fn warn_missing_key<W: Write>(out: &mut W) -> Result<()> {
    writeln!(
        out,
        "WARNING: {} not found in environment or .env file.",
        API_KEY_ENV
    )?;
    writeln!(out, "Please add your key to the .env file.")?;
    Ok(())
}

/// Report a failed run with a remediation hint
pub fn report_failure<W: Write>(out: &mut W, error: &dyn Display) -> Result<()> {
    writeln!(out, "\nError occurred: {}", error)?;
    writeln!(out, "{}", FAILURE_TIP)?;
    out.flush()?;
    Ok(())
}

/// Run the interview pipeline
pub async fn run_interview<W: Write>(
    provider: &dyn LLMProvider,
    params: GenerationParams,
    mode: AnswerMode,
    input: SessionInput,
    out: &mut W,
) -> Result<InterviewState> {
    Pipeline::new(provider)
        .with_params(params)
        .with_answer_mode(mode)
        .run(input, out)
        .await
}

/// Print the names of models that support content generation
pub async fn write_model_list<W: Write>(provider: &dyn LLMProvider, out: &mut W) -> Result<()> {
    writeln!(out, "Available models:")?;
    out.flush()?;
    for model in content_models(provider.list_models().await?) {
        writeln!(out, "{}", model.name)?;
    }
    Ok(())
}

/// Report a failed model listing
pub fn report_listing_failure<W: Write>(out: &mut W, error: &dyn Display) -> Result<()> {
    writeln!(out, "Error listing models: {}", error)?;
    out.flush()?;
    Ok(())
}

/// Model lister entry: stops early without a key, reports failures inline
pub async fn run_model_listing<W: Write>(settings: &Settings, out: &mut W) -> Result<()> {
    if !settings.has_api_key() {
        writeln!(out, "No API key found in .env")?;
        return Ok(());
    }

    let result = match settings.build_provider() {
        Ok(provider) => write_model_list(&provider, out).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        report_listing_failure(out, &e)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "interview-prep",
            "--role",
            "Rust Engineer",
            "-l",
            "Senior",
            "--parallel",
            "-vv",
        ]);
        assert_eq!(cli.role.as_deref(), Some("Rust Engineer"));
        assert_eq!(cli.level.as_deref(), Some("Senior"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.answer_mode(), AnswerMode::Concurrent);
    }

    #[test]
    fn test_parse_no_flags() {
        let cli = Cli::parse_from(["interview-prep"]);
        assert!(cli.role.is_none());
        assert!(cli.model.is_none());
        assert_eq!(cli.answer_mode(), AnswerMode::Sequential);
    }

    #[test]
    fn test_list_models_flags() {
        let cli = ListModelsCli::parse_from(["list-models", "--config", "/tmp/c.toml", "-v"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_report_failure() {
        let mut out = Vec::new();
        report_failure(&mut out, &"boom").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("\nError occurred: boom\n{}\n", FAILURE_TIP));
    }

    #[test]
    fn test_warn_missing_key() {
        let mut out = Vec::new();
        warn_missing_key(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("WARNING: GOOGLE_API_KEY not found"));
    }

    #[tokio::test]
    async fn test_model_listing_without_key() {
        let mut out = Vec::new();
        run_model_listing(&Settings::default(), &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No API key found in .env\n");
    }

    #[tokio::test]
    async fn test_model_listing_failure_is_reported() {
        let settings = Settings {
            api_key: Some("key".to_string()),
            base_url: "not a url".to_string(),
            ..Settings::default()
        };
        let mut out = Vec::new();

        run_model_listing(&settings, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Available models:\nError listing models: Configuration error"));
    }
}
