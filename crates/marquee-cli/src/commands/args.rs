//! Argument groups shared between subcommands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use marquee_core::{Category, CategoryFilter, MediaDraft, MediaFilter, PosterUpload};

/// Record fields as flags.
#[derive(Args, Debug, Default)]
pub struct DraftArgs {
    /// Title
    #[arg(long)]
    pub title: Option<String>,

    /// Category: "Movie" or "TV Show"
    #[arg(long = "type", value_name = "TYPE")]
    pub category: Option<Category>,

    /// Director
    #[arg(long)]
    pub director: Option<String>,

    /// Budget, e.g. "$160M"
    #[arg(long)]
    pub budget: Option<String>,

    /// Filming location
    #[arg(long)]
    pub location: Option<String>,

    /// Duration, e.g. "148 min" or "5 seasons"
    #[arg(long)]
    pub duration: Option<String>,

    /// Release year or airing range, e.g. "2010" or "2008-2013"
    #[arg(long, visible_alias = "year")]
    pub period: Option<String>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    /// Poster image to upload (jpg, png, gif or webp)
    #[arg(long, value_name = "FILE")]
    pub poster: Option<PathBuf>,
}

impl DraftArgs {
    /// Build a draft from the flags that were given, reading the poster file.
    pub fn into_draft(self) -> Result<MediaDraft> {
        let poster = self
            .poster
            .as_deref()
            .map(PosterUpload::from_path)
            .transpose()
            .context("Failed to read poster")?;

        Ok(MediaDraft {
            title: self.title,
            category: self.category,
            director: self.director,
            budget: self.budget,
            location: self.location,
            duration: self.duration,
            period: self.period,
            description: self.description,
            poster,
        })
    }
}

/// Client-side filter flags.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Case-insensitive text to find in title, description, director or location
    #[arg(long, short)]
    pub search: Option<String>,

    /// Only show one category: "Movie", "TV Show" or "All"
    #[arg(long = "type", value_name = "TYPE", default_value_t)]
    pub category: CategoryFilter,

    /// Case-insensitive director substring
    #[arg(long)]
    pub director: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> MediaFilter {
        MediaFilter::new()
            .with_search(self.search.clone().unwrap_or_default())
            .with_category(self.category)
            .with_director(self.director.clone().unwrap_or_default())
    }
}
