// Countdown Cards Application
// Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use countdown_cards::models::document::Document;
use countdown_cards::services::countdown::{self, CountdownUpdater};

#[derive(Parser, Debug)]
#[command(name = "countdown-cards")]
#[command(about = "Per-second countdown cards driven by an attribute document")]
#[command(version)]
struct Cli {
    /// Path to the card document (.toml or .json)
    document: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    log::info!("Starting countdown cards from {}", cli.document.display());

    let document = Document::load(&cli.document)?;
    let mut updater = CountdownUpdater::discover(&document);

    countdown::run(&mut updater, |updater| {
        for card in updater.cards() {
            println!("{}", card.display_line());
        }
    })
    .await;

    Ok(())
}
