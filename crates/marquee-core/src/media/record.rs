//! Canonical media record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Category, GatewayUrl, MediaId};

/// A media record as stored by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    /// Gateway-assigned identity; never changes once assigned.
    pub id: MediaId,

    pub title: String,

    #[serde(rename = "type")]
    pub category: Category,

    pub director: String,

    /// Free-form budget text (e.g. "$160M").
    pub budget: String,

    pub location: String,

    /// Free-form duration text (e.g. "148 min", "5 seasons").
    pub duration: String,

    /// Free-form release year or airing range (e.g. "2010", "2008-2013").
    #[serde(rename = "yearTime", alias = "year_time")]
    pub period: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Poster reference, either an absolute URL or a server-relative path.
    #[serde(
        rename = "imageUrl",
        alias = "image_url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub poster: Option<String>,

    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,

    #[serde(alias = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

impl MediaRecord {
    /// Returns the fetchable poster URL, if the record has a poster.
    pub fn poster_url(&self, gateway: &GatewayUrl) -> Option<String> {
        self.poster
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| gateway.resolve_asset(p))
    }
}
