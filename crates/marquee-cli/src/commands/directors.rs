//! Directors command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use marquee_core::MediaCollection;

use super::load_all;
use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct DirectorsArgs {
    /// Print the directors as a JSON array
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: DirectorsArgs, settings: &Settings) -> Result<()> {
    let mut collection = MediaCollection::new(settings.connect()?);
    load_all(&mut collection, settings.page_size).await?;

    let directors = collection.directors();

    if args.json {
        return output::json_pretty(&directors);
    }

    if directors.is_empty() {
        eprintln!("{}", "No directors found.".dimmed());
    }
    for director in &directors {
        println!("{}", director);
    }

    Ok(())
}
