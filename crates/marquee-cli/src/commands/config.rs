//! Config subcommand implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use marquee_core::GatewayUrl;

use crate::config::{Settings, storage};
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Show the effective settings and where they come from
    Show,

    /// Store the gateway base URL
    SetGateway {
        /// Gateway base URL, e.g. http://localhost:5000/api
        url: String,
    },

    /// Store the default page size
    SetPageSize {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        size: u32,
    },

    /// Remove the stored config file
    Reset,
}

pub fn run(cmd: ConfigCommand, gateway: Option<&str>) -> Result<()> {
    match cmd.command {
        ConfigSubcommand::Show => show(gateway),
        ConfigSubcommand::SetGateway { url } => {
            let url = GatewayUrl::new(&url).context("Invalid gateway URL")?;
            let mut config = storage::load()?;
            config.gateway = Some(url.to_string());
            let path = storage::save(&config)?;
            output::success(&format!("Gateway set to {}", url));
            output::field("Config file", &path.display().to_string());
            Ok(())
        }
        ConfigSubcommand::SetPageSize { size } => {
            let mut config = storage::load()?;
            config.page_size = size;
            let path = storage::save(&config)?;
            output::success(&format!("Page size set to {}", size));
            output::field("Config file", &path.display().to_string());
            Ok(())
        }
        ConfigSubcommand::Reset => {
            if storage::clear()? {
                output::success("Config reset to defaults");
            } else {
                eprintln!("{}", "No stored config.".dimmed());
            }
            Ok(())
        }
    }
}

fn show(gateway: Option<&str>) -> Result<()> {
    let settings = Settings::resolve(gateway)?;
    let path = storage::config_path()?;

    output::field(
        "Gateway",
        &format!("{} ({})", settings.gateway, settings.source),
    );
    output::field("Page size", &settings.page_size.to_string());
    output::field("Config file", &path.display().to_string());

    Ok(())
}
