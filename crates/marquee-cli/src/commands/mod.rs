//! Subcommand implementations.

pub mod args;
pub mod browse;
pub mod config;
pub mod create;
pub mod delete;
pub mod directors;
pub mod get;
pub mod list;
pub mod poster_url;
pub mod update;

use anyhow::{Result, anyhow};
use tracing::warn;

use marquee_core::{MediaCollection, MediaGateway};

use crate::cli::Commands;
use crate::config::Settings;

pub async fn handle(command: Commands, gateway: Option<&str>) -> Result<()> {
    let settings = || Settings::resolve(gateway);

    match command {
        Commands::List(args) => list::run(args, &settings()?).await,
        Commands::Get(args) => get::run(args, &settings()?).await,
        Commands::Create(args) => create::run(args, &settings()?).await,
        Commands::Update(args) => update::run(args, &settings()?).await,
        Commands::Delete(args) => delete::run(args, &settings()?).await,
        Commands::Directors(args) => directors::run(args, &settings()?).await,
        Commands::Browse(args) => browse::run(args, &settings()?).await,
        Commands::PosterUrl(args) => poster_url::run(args, &settings()?).await,
        Commands::Config(cmd) => config::run(cmd, gateway),
    }
}

/// The controller's last error as a command failure.
fn failure<G: MediaGateway>(collection: &MediaCollection<G>, action: &str) -> anyhow::Error {
    match collection.error() {
        Some(message) if message != action => anyhow!("{}: {}", action, message),
        _ => anyhow!("{}", action),
    }
}

/// Load page 1 and every page after it.
async fn load_all<G: MediaGateway>(
    collection: &mut MediaCollection<G>,
    page_size: u32,
) -> Result<()> {
    if !collection.refresh(page_size).await {
        return Err(failure(collection, "Failed to load media"));
    }

    while collection.cursor().has_next {
        let page = collection.cursor().current_page;
        let before = collection.records().len();
        if !collection.load_next(page_size).await {
            return Err(failure(collection, "Failed to load media"));
        }
        if collection.cursor().current_page <= page {
            warn!(page, "Gateway did not advance past page");
            break;
        }
        if collection.records().len() == before {
            warn!(
                page = collection.cursor().current_page,
                "Gateway reported more pages but sent an empty one"
            );
            break;
        }
    }

    Ok(())
}
