//! Media gateway trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::media::{MediaDraft, MediaPage, MediaRecord};
use crate::types::{GatewayUrl, MediaId};

/// A remote store of media records.
///
/// Implementations talk to the catalog service; the list controller only
/// ever goes through this trait, so tests can substitute their own.
#[async_trait]
pub trait MediaGateway: Send + Sync {
    /// Returns the gateway base URL, used to resolve poster paths.
    fn url(&self) -> &GatewayUrl;

    /// Fetch one page of records. `page` is 1-based.
    async fn list_media(&self, page: u32, limit: u32) -> Result<MediaPage>;

    /// Fetch a single record.
    async fn get_media(&self, id: &MediaId) -> Result<MediaRecord>;

    /// Create a record from a complete draft and return the stored record.
    async fn create_media(&self, draft: &MediaDraft) -> Result<MediaRecord>;

    /// Apply a partial draft and return the stored record.
    async fn update_media(&self, id: &MediaId, draft: &MediaDraft) -> Result<MediaRecord>;

    /// Delete a record.
    async fn delete_media(&self, id: &MediaId) -> Result<()>;
}

#[async_trait]
impl<G: MediaGateway + ?Sized> MediaGateway for Arc<G> {
    fn url(&self) -> &GatewayUrl {
        (**self).url()
    }

    async fn list_media(&self, page: u32, limit: u32) -> Result<MediaPage> {
        (**self).list_media(page, limit).await
    }

    async fn get_media(&self, id: &MediaId) -> Result<MediaRecord> {
        (**self).get_media(id).await
    }

    async fn create_media(&self, draft: &MediaDraft) -> Result<MediaRecord> {
        (**self).create_media(draft).await
    }

    async fn update_media(&self, id: &MediaId, draft: &MediaDraft) -> Result<MediaRecord> {
        (**self).update_media(id, draft).await
    }

    async fn delete_media(&self, id: &MediaId) -> Result<()> {
        (**self).delete_media(id).await
    }
}
