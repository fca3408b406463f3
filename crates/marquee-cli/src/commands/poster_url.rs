//! Poster URL command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use marquee_core::{MediaCollection, MediaGateway, MediaId};

use crate::config::Settings;

#[derive(Args, Debug)]
pub struct PosterUrlArgs {
    /// Record id
    pub id: String,
}

pub async fn run(args: PosterUrlArgs, settings: &Settings) -> Result<()> {
    let id = MediaId::new(&args.id).context("Invalid media id")?;
    let collection = MediaCollection::new(settings.connect()?);

    let record = match collection.fetch(&id).await {
        Ok(record) => record,
        Err(e) if e.is_not_found() => bail!("Media {} not found", id),
        Err(e) => return Err(e).context("Failed to get media"),
    };

    match record.poster_url(collection.gateway().url()) {
        Some(url) => {
            println!("{}", url);
            Ok(())
        }
        None => bail!("Media {} has no poster", id),
    }
}
