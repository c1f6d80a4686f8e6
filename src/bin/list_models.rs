// Interview-Prep model lister
//
// Prints the Gemini models that support content generation.

use anyhow::Result;
use clap::Parser;
use interview_prep::cli::commands::{self, ListModelsCli};
use interview_prep::config::{self, Settings};
use interview_prep::logging;
use std::io;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = ListModelsCli::parse();
    logging::init(cli.verbose);
    config::load_dotenv();

    let mut stdout = io::stdout();

    match Settings::load(cli.config.as_deref()) {
        Ok(settings) => commands::run_model_listing(&settings, &mut stdout).await?,
        Err(e) => commands::report_listing_failure(&mut stdout, &e)?,
    }

    Ok(())
}
