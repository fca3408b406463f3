//! Delete command implementation.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;

use marquee_core::{MediaCollection, MediaId};

use super::failure;
use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Record id
    pub id: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub async fn run(args: DeleteArgs, settings: &Settings) -> Result<()> {
    let id = MediaId::new(&args.id).context("Invalid media id")?;

    if !args.yes && !confirm(&format!("Delete media {}?", id))? {
        eprintln!("Aborted.");
        return Ok(());
    }

    let mut collection = MediaCollection::new(settings.connect()?);
    if !collection.delete(&id).await {
        return Err(failure(&collection, "Failed to delete media"));
    }

    output::success(&format!("Deleted media {}", id));

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let answer = input.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
