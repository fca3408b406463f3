//! Get command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use marquee_core::{MediaCollection, MediaGateway, MediaId};

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Record id
    pub id: String,

    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: GetArgs, settings: &Settings) -> Result<()> {
    let id = MediaId::new(&args.id).context("Invalid media id")?;
    let collection = MediaCollection::new(settings.connect()?);

    let record = match collection.fetch(&id).await {
        Ok(record) => record,
        Err(e) if e.is_not_found() => bail!("Media {} not found", id),
        Err(e) => return Err(e).context("Failed to get media"),
    };

    if args.json {
        output::json_pretty(&record)
    } else {
        output::record_details(&record, collection.gateway().url());
        Ok(())
    }
}
