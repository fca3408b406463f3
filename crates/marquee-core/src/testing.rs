//! Test fixtures: record builders and an in-memory gateway.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::Result;
use crate::error::{Error, GatewayError};
use crate::media::{MediaDraft, MediaPage, MediaRecord, PageCursor};
use crate::traits::MediaGateway;
use crate::types::{Category, GatewayUrl, MediaId};

fn timestamp() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

/// Build a record with the fields the filter engine looks at.
pub(crate) fn record(id: u64, title: &str, category: Category, director: &str) -> MediaRecord {
    MediaRecord {
        id: MediaId::from(id),
        title: title.to_string(),
        category,
        director: director.to_string(),
        budget: "$1M".to_string(),
        location: "Somewhere".to_string(),
        duration: "100 min".to_string(),
        period: "2000".to_string(),
        description: None,
        poster: None,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

/// `count` records with ids starting at `first`.
pub(crate) fn records(first: u64, count: u64) -> Vec<MediaRecord> {
    (first..first + count)
        .map(|i| record(i, &format!("Title {}", i), Category::Film, "Director"))
        .collect()
}

#[derive(Default)]
struct Inner {
    records: Vec<MediaRecord>,
    next_id: u64,
    fail_next: Option<u16>,
    stall_next: bool,
    list_calls: Vec<(u32, u32)>,
}

/// A gateway that keeps its records in memory and paginates like the real one.
pub(crate) struct InMemoryGateway {
    url: GatewayUrl,
    inner: Mutex<Inner>,
}

impl InMemoryGateway {
    pub(crate) fn new(records: Vec<MediaRecord>) -> Self {
        let next_id = records.len() as u64 + 1000;
        Self {
            url: GatewayUrl::default(),
            inner: Mutex::new(Inner {
                records,
                next_id,
                ..Inner::default()
            }),
        }
    }

    /// Make the next call fail with the given HTTP status.
    pub(crate) fn fail_next(&self, status: u16) {
        self.inner.lock().unwrap().fail_next = Some(status);
    }

    /// Make the next list call hang until its future is dropped.
    pub(crate) fn stall_next(&self) {
        self.inner.lock().unwrap().stall_next = true;
    }

    /// `(page, limit)` of every list call so far.
    pub(crate) fn list_calls(&self) -> Vec<(u32, u32)> {
        self.inner.lock().unwrap().list_calls.clone()
    }

    fn check_failure(inner: &mut Inner) -> Result<()> {
        match inner.fail_next.take() {
            Some(status) => Err(GatewayError::new(status, Some("boom".to_string()), None).into()),
            None => Ok(()),
        }
    }

    fn not_found() -> Error {
        GatewayError::new(404, Some("Media not found".to_string()), None).into()
    }
}

#[async_trait]
impl MediaGateway for InMemoryGateway {
    fn url(&self) -> &GatewayUrl {
        &self.url
    }

    async fn list_media(&self, page: u32, limit: u32) -> Result<MediaPage> {
        let stall = std::mem::take(&mut self.inner.lock().unwrap().stall_next);
        if stall {
            std::future::pending::<()>().await;
        }

        let mut inner = self.inner.lock().unwrap();
        inner.list_calls.push((page, limit));
        Self::check_failure(&mut inner)?;

        let total_items = inner.records.len() as u64;
        let limit = limit.max(1);
        let total_pages = (total_items.div_ceil(limit as u64) as u32).max(1);
        let start = ((page - 1) * limit) as usize;
        let records = inner
            .records
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(MediaPage {
            records,
            pagination: PageCursor {
                current_page: page,
                total_pages,
                total_items,
                has_next: page < total_pages,
                has_prev: page > 1,
            },
        })
    }

    async fn get_media(&self, id: &MediaId) -> Result<MediaRecord> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_failure(&mut inner)?;
        inner
            .records
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn create_media(&self, draft: &MediaDraft) -> Result<MediaRecord> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_failure(&mut inner)?;

        let id = inner.next_id;
        inner.next_id += 1;

        let created = MediaRecord {
            id: MediaId::from(id),
            title: draft.title.clone().unwrap_or_default(),
            category: draft.category.unwrap_or(Category::Film),
            director: draft.director.clone().unwrap_or_default(),
            budget: draft.budget.clone().unwrap_or_default(),
            location: draft.location.clone().unwrap_or_default(),
            duration: draft.duration.clone().unwrap_or_default(),
            period: draft.period.clone().unwrap_or_default(),
            description: draft.description.clone(),
            poster: draft
                .poster
                .as_ref()
                .map(|p| format!("/uploads/{}", p.file_name())),
            created_at: timestamp(),
            updated_at: timestamp(),
        };
        inner.records.insert(0, created.clone());
        Ok(created)
    }

    async fn update_media(&self, id: &MediaId, draft: &MediaDraft) -> Result<MediaRecord> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_failure(&mut inner)?;

        let stored = inner
            .records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(Self::not_found)?;

        if let Some(title) = &draft.title {
            stored.title = title.clone();
        }
        if let Some(category) = draft.category {
            stored.category = category;
        }
        if let Some(director) = &draft.director {
            stored.director = director.clone();
        }
        if let Some(description) = &draft.description {
            stored.description = Some(description.clone());
        }
        Ok(stored.clone())
    }

    async fn delete_media(&self, id: &MediaId) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_failure(&mut inner)?;

        let before = inner.records.len();
        inner.records.retain(|r| &r.id != id);
        if inner.records.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }
}
