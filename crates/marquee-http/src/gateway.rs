//! HTTP-backed media gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::{debug, instrument};

use marquee_core::error::InvalidInputError;
use marquee_core::{
    GatewayUrl, MediaDraft, MediaGateway, MediaId, MediaPage, MediaRecord, PosterUpload, Result,
};

use crate::client::HttpClient;
use crate::endpoints::{DataResponse, ListMediaQuery, MEDIA, POSTER_PART, media_item};

/// A network-backed media gateway.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: HttpClient,
}

impl HttpGateway {
    /// Create a gateway for the given base URL.
    pub fn new(gateway: GatewayUrl) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(gateway)?,
        })
    }

    /// Create a gateway whose requests time out after `timeout`.
    pub fn with_timeout(gateway: GatewayUrl, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: HttpClient::with_timeout(gateway, timeout)?,
        })
    }

    /// Send a draft as JSON, or as a multipart form if it carries a poster.
    async fn send_draft(
        &self,
        method: Method,
        path: &str,
        draft: &MediaDraft,
    ) -> Result<MediaRecord> {
        let response: DataResponse<MediaRecord> = match &draft.poster {
            Some(poster) => {
                let form = draft_form(draft, poster)?;
                self.client.send_multipart(method, path, form).await?
            }
            None => self.client.send_json(method, path, draft).await?,
        };
        Ok(response.data)
    }
}

/// Text fields as form parts, then the poster as a file part.
fn draft_form(draft: &MediaDraft, poster: &PosterUpload) -> Result<Form> {
    let form = draft
        .form_fields()
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));

    let part = Part::bytes(poster.bytes().to_vec())
        .file_name(poster.file_name().to_string())
        .mime_str(poster.mime_type())
        .map_err(|e| InvalidInputError::Poster {
            path: poster.file_name().to_string(),
            reason: e.to_string(),
        })?;

    Ok(form.part(POSTER_PART, part))
}

#[async_trait]
impl MediaGateway for HttpGateway {
    fn url(&self) -> &GatewayUrl {
        self.client.gateway()
    }

    #[instrument(skip(self))]
    async fn list_media(&self, page: u32, limit: u32) -> Result<MediaPage> {
        debug!("Listing media via HTTP");
        self.client
            .get_with_query(MEDIA, &ListMediaQuery { page, limit })
            .await
    }

    #[instrument(skip(self))]
    async fn get_media(&self, id: &MediaId) -> Result<MediaRecord> {
        debug!("Fetching media via HTTP");
        let response: DataResponse<MediaRecord> = self.client.get(&media_item(id)).await?;
        Ok(response.data)
    }

    #[instrument(skip(self, draft), fields(with_poster = draft.poster.is_some()))]
    async fn create_media(&self, draft: &MediaDraft) -> Result<MediaRecord> {
        debug!("Creating media via HTTP");
        self.send_draft(Method::POST, MEDIA, draft).await
    }

    #[instrument(skip(self, draft), fields(with_poster = draft.poster.is_some()))]
    async fn update_media(&self, id: &MediaId, draft: &MediaDraft) -> Result<MediaRecord> {
        debug!("Updating media via HTTP");
        self.send_draft(Method::PUT, &media_item(id), draft).await
    }

    #[instrument(skip(self))]
    async fn delete_media(&self, id: &MediaId) -> Result<()> {
        debug!("Deleting media via HTTP");
        self.client.delete(&media_item(id)).await
    }
}
