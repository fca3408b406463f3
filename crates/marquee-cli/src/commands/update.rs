//! Update command implementation.
//!
//! Fetches the current record first and sends only the fields whose values
//! actually change.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use marquee_core::{MediaCollection, MediaId};

use super::args::DraftArgs;
use super::failure;
use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Record id
    pub id: String,

    #[command(flatten)]
    pub fields: DraftArgs,
}

pub async fn run(args: UpdateArgs, settings: &Settings) -> Result<()> {
    let id = MediaId::new(&args.id).context("Invalid media id")?;
    let draft = args.fields.into_draft()?;
    if draft.is_empty() {
        bail!("Nothing to update: pass at least one field flag");
    }

    let mut collection = MediaCollection::new(settings.connect()?);

    let current = match collection.fetch(&id).await {
        Ok(record) => record,
        Err(e) if e.is_not_found() => bail!("Media {} not found", id),
        Err(e) => return Err(e).context("Failed to get media"),
    };

    let changes = draft.changed_since(&current);
    if changes.is_empty() {
        eprintln!("{}", "No changes.".dimmed());
        return Ok(());
    }

    if !collection.update(&id, &changes).await {
        return Err(failure(&collection, "Failed to update media"));
    }

    output::success(&format!("Updated media {}", id));
    for (field, value) in changes.form_fields() {
        output::field(field, &value);
    }
    if let Some(poster) = &changes.poster {
        output::field("poster", poster.file_name());
    }

    Ok(())
}
