// Interview-Prep: generate interview questions and answers with Gemini
//
// This is the main entry point for the interview pipeline.

use anyhow::Result;
use clap::Parser;
use interview_prep::cli::commands::{self, Cli, WELCOME};
use interview_prep::cli::read_session_input;
use interview_prep::config::{self, Settings};
use interview_prep::logging;
use std::io;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    config::load_dotenv();

    let mut stdout = io::stdout();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings.with_model_override(cli.model.clone()),
        Err(e) => {
            commands::report_failure(&mut stdout, &e)?;
            return Ok(());
        }
    };

    if !settings.has_api_key() {
        commands::warn_missing_key(&mut stdout)?;
    }

    println!("{}", WELCOME);

    let input = match read_session_input(&cli) {
        Ok(input) => input,
        Err(e) => {
            println!("\n{}", e);
            return Ok(());
        }
    };

    info!(model = %settings.model, role = input.job_role(), "starting interview pipeline");

    let provider = match settings.build_provider() {
        Ok(provider) => provider,
        Err(e) => {
            commands::report_failure(&mut stdout, &e)?;
            return Ok(());
        }
    };

    if let Err(e) = commands::run_interview(
        &provider,
        settings.generation_params(),
        cli.answer_mode(),
        input,
        &mut stdout,
    )
    .await
    {
        commands::report_failure(&mut stdout, &e)?;
    }

    Ok(())
}
