//! Interactive browse command.
//!
//! Renders the catalog a viewport at a time. Each Enter scrolls down one
//! viewport; the scroll trigger fetches the next page as the bottom comes
//! into reach. One row is one scroll unit.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use marquee_core::{
    InfiniteScroll, MediaCollection, MediaFilter, MediaGateway, ScrollSample, ScrollTrigger,
};

use super::args::FilterArgs;
use super::failure;
use crate::config::Settings;
use crate::output;

/// Rows from the bottom at which the next page is requested.
const PROXIMITY_ROWS: f64 = 2.0;

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Records per page (defaults to the configured page size)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,

    /// Rows shown per screen
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub viewport: u32,

    #[command(flatten)]
    pub filter: FilterArgs,
}

pub async fn run(args: BrowseArgs, settings: &Settings) -> Result<()> {
    let limit = args.limit.unwrap_or(settings.page_size);
    let collection = MediaCollection::new(settings.connect()?);
    let input = BufReader::new(tokio::io::stdin());

    browse(collection, limit, &args, input).await
}

async fn browse<G, R>(
    collection: MediaCollection<G>,
    limit: u32,
    args: &BrowseArgs,
    input: R,
) -> Result<()>
where
    G: MediaGateway,
    R: AsyncBufRead + Unpin,
{
    let filter = args.filter.to_filter();
    let viewport = args.viewport as usize;

    let mut feed = InfiniteScroll::new(collection, limit)
        .with_trigger(ScrollTrigger::with_threshold(PROXIMITY_ROWS));

    if !feed.mount().await {
        return Err(failure(feed.collection(), "Failed to load media"));
    }

    output::table_header();
    let mut scroll_top = 0;
    let mut printed = render(&feed, &filter, 0, viewport);

    let mut lines = input.lines();
    loop {
        let visible = feed.collection().filtered(&filter).len();
        let cursor = feed.collection().cursor();
        if printed >= visible && !cursor.has_next {
            eprintln!("{}", "-- end of catalog --".dimmed());
            break;
        }

        eprint!(
            "{}",
            format!(
                "-- {} shown, {} in catalog (Enter for more, q to quit) --",
                printed, cursor.total_items
            )
            .dimmed()
        );
        let Some(line) = lines.next_line().await? else {
            eprintln!();
            break;
        };
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }

        // Scroll one viewport down, stopping where the content ends.
        let target = scroll_top + viewport;
        let sample = ScrollSample::new(
            target.min(visible.saturating_sub(viewport)) as f64,
            viewport as f64,
            visible as f64,
        );
        if let Some(false) = feed.scrolled(sample).await {
            output::error(feed.collection().error().unwrap_or("Failed to load media"));
        }

        let visible = feed.collection().filtered(&filter).len();
        scroll_top = target.min(visible.saturating_sub(viewport));
        printed = render(&feed, &filter, printed, scroll_top + viewport);
    }

    feed.unmount();
    Ok(())
}

/// Print filtered rows from `from` up to `until`. Returns the new printed count.
fn render<G: MediaGateway>(
    feed: &InfiniteScroll<G>,
    filter: &MediaFilter,
    from: usize,
    until: usize,
) -> usize {
    let visible = feed.collection().filtered(filter);
    let until = until.min(visible.len());
    for record in visible.iter().take(until).skip(from) {
        output::record_row(record);
    }
    until.max(from)
}
