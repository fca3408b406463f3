//! Create command implementation.

use anyhow::{Result, bail};
use clap::Args;

use marquee_core::{MediaCollection, MediaGateway};

use super::args::DraftArgs;
use super::failure;
use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub fields: DraftArgs,

    /// Print the created record as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: CreateArgs, settings: &Settings) -> Result<()> {
    let draft = args.fields.into_draft()?;
    let mut collection = MediaCollection::new(settings.connect()?);

    if !collection.create(&draft).await {
        return Err(failure(&collection, "Failed to create media"));
    }

    let Some(record) = collection.records().first() else {
        bail!("Gateway accepted the record but returned nothing");
    };

    if args.json {
        return output::json_pretty(record);
    }

    output::success(&format!("Created media {}", record.id));
    println!();
    output::record_details(record, collection.gateway().url());

    Ok(())
}
