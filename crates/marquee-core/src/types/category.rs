//! Media category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Whether a record is a film or a series.
///
/// On the wire these are the strings `"Movie"` and `"TV Show"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Movie")]
    Film,
    #[serde(rename = "TV Show")]
    Series,
}

impl Category {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Film => "Movie",
            Category::Series => "TV Show",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" | "film" => Ok(Category::Film),
            "tv show" | "tv-show" | "tv" | "series" | "show" => Ok(Category::Series),
            _ => Err(InvalidInputError::Category {
                value: s.to_string(),
            }
            .into()),
        }
    }
}
