//! Gateway endpoint paths and wire envelopes.

use serde::{Deserialize, Serialize};

use marquee_core::MediaId;

/// Collection endpoint: list and create.
pub(crate) const MEDIA: &str = "media";

/// Item endpoint: get, update and delete.
pub(crate) fn media_item(id: &MediaId) -> String {
    format!("{}/{}", MEDIA, id)
}

/// Multipart part name for the poster image.
pub(crate) const POSTER_PART: &str = "poster";

/// Query string for the list endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct ListMediaQuery {
    pub page: u32,
    pub limit: u32,
}

/// Single-record responses wrap the record in `data`.
#[derive(Debug, Deserialize)]
pub(crate) struct DataResponse<T> {
    pub data: T,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
