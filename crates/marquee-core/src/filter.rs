//! Client-side filtering of loaded records.
//!
//! Filtering is a pure derivation over the loaded collection. It is cheap
//! enough at catalog scale to recompute on every input change, so nothing
//! here is cached.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::media::MediaRecord;
use crate::types::Category;

/// Restricts results to one category, or lets everything through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Search text plus categorical filters.
///
/// A record is visible when it passes all three:
/// - `search` is empty or a case-insensitive substring of the title,
///   description, director or location;
/// - `category` matches;
/// - `director` is empty or a case-insensitive substring of the director.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaFilter {
    pub search: String,
    pub category: CategoryFilter,
    pub director: String,
}

impl MediaFilter {
    /// A filter that lets everything through.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = director.into();
        self
    }

    /// Returns true if any input would hide records.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.category != CategoryFilter::All || !self.director.is_empty()
    }

    /// Reset every input.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, record: &MediaRecord) -> bool {
        self.matches_search(record)
            && self.category.matches(record.category)
            && contains_ignore_case(&record.director, &self.director)
    }

    /// The records that pass, in their original order.
    pub fn apply<'a>(&self, records: &'a [MediaRecord]) -> Vec<&'a MediaRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    fn matches_search(&self, record: &MediaRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let query = self.search.to_lowercase();
        [
            Some(record.title.as_str()),
            record.description.as_deref(),
            Some(record.director.as_str()),
            Some(record.location.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&query))
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Distinct non-empty directors, sorted lexicographically.
pub fn distinct_directors(records: &[MediaRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.director.as_str())
        .filter(|d| !d.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
