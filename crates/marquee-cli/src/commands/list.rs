//! List command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use marquee_core::MediaCollection;

use super::args::FilterArgs;
use super::{failure, load_all};
use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page to fetch (1-based)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Records per page (defaults to the configured page size)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,

    /// Fetch every page instead of one
    #[arg(long, conflicts_with = "page")]
    pub all: bool,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, settings: &Settings) -> Result<()> {
    let limit = args.limit.unwrap_or(settings.page_size);
    let mut collection = MediaCollection::new(settings.connect()?);

    if args.all {
        load_all(&mut collection, limit).await?;
    } else if !collection.load_page(args.page, limit).await {
        return Err(failure(&collection, "Failed to load media"));
    }

    let filter = args.filter.to_filter();
    let visible = collection.filtered(&filter);

    if args.json {
        return output::json_pretty(&visible);
    }

    if visible.is_empty() {
        eprintln!("{}", "No media found.".dimmed());
    } else {
        output::record_table(&visible);
    }

    let cursor = collection.cursor();
    eprintln!();
    if args.all {
        eprintln!(
            "{}",
            format!("{} of {} records", visible.len(), cursor.total_items).dimmed()
        );
    } else {
        eprintln!(
            "{}",
            format!(
                "Page {} of {} ({} records total)",
                cursor.current_page, cursor.total_pages, cursor.total_items
            )
            .dimmed()
        );
    }
    if filter.is_active() {
        eprintln!(
            "{}",
            format!(
                "{} of {} loaded records match the filters",
                visible.len(),
                collection.records().len()
            )
            .dimmed()
        );
    }

    Ok(())
}
