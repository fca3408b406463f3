//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{browse, config, create, delete, directors, get, list, poster_url, update};

/// Browse and edit a remote media catalog.
#[derive(Parser, Debug)]
#[command(name = "marquee")]
#[command(author, version = env!("MARQUEE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Gateway base URL (overrides MARQUEE_GATEWAY and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub gateway: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List one page (or every page) of the catalog
    List(list::ListArgs),

    /// Show a single record
    Get(get::GetArgs),

    /// Create a record
    Create(create::CreateArgs),

    /// Change fields of an existing record
    Update(update::UpdateArgs),

    /// Delete a record
    Delete(delete::DeleteArgs),

    /// List the distinct directors in the catalog
    Directors(directors::DirectorsArgs),

    /// Page through the catalog interactively
    Browse(browse::BrowseArgs),

    /// Print the resolved poster URL of a record
    PosterUrl(poster_url::PosterUrlArgs),

    /// Show or change stored settings
    Config(config::ConfigCommand),
}
