//! The list state controller.
//!
//! [`MediaCollection`] owns the records loaded so far, the pagination
//! cursor and the last error. Pages are merged as they arrive: page 1
//! replaces the collection, later pages are appended in server order.
//! Mutations are applied locally only after the gateway confirms them, so
//! a failed call never leaves the collection half-changed.

use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::error::Error;
use crate::filter::{MediaFilter, distinct_directors};
use crate::media::{MediaDraft, MediaRecord, PageCursor};
use crate::traits::MediaGateway;
use crate::types::MediaId;

/// Page size used when the caller has no preference.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

const LOAD_FAILED: &str = "Failed to load media";
const CREATE_FAILED: &str = "Failed to create media";
const UPDATE_FAILED: &str = "Failed to update media";
const DELETE_FAILED: &str = "Failed to delete media";

/// Loading status published by a [`MediaCollection`].
///
/// `generation` counts completed page loads, successful or not. An observer
/// that remembers the generation it saw can tell that a load finished even
/// if it never saw `in_flight` set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingState {
    pub in_flight: bool,
    pub generation: u64,
}

/// Everything the controller knows about the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionState {
    records: Vec<MediaRecord>,
    error: Option<String>,
    cursor: PageCursor,
}

impl CollectionState {
    /// Loaded records in display order.
    pub fn records(&self) -> &[MediaRecord] {
        &self.records
    }

    /// The message of the last failed operation, if the most recent one failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Pagination metadata from the last successful page load.
    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }
}

/// Marks a page load in flight until dropped.
///
/// Clearing the flag on drop keeps it from sticking when the load future
/// is cancelled mid-request.
struct LoadingGuard<'a> {
    loading: &'a watch::Sender<LoadingState>,
}

impl<'a> LoadingGuard<'a> {
    fn begin(loading: &'a watch::Sender<LoadingState>) -> Self {
        loading.send_modify(|state| state.in_flight = true);
        Self { loading }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.loading.send_modify(|state| {
            state.in_flight = false;
            state.generation += 1;
        });
    }
}

/// Client-side list controller over a [`MediaGateway`].
#[derive(Debug)]
pub struct MediaCollection<G> {
    gateway: G,
    state: CollectionState,
    loading: watch::Sender<LoadingState>,
}

impl<G: MediaGateway> MediaCollection<G> {
    /// Create an empty collection. Nothing is fetched until [`load_page`](Self::load_page).
    pub fn new(gateway: G) -> Self {
        let (loading, _) = watch::channel(LoadingState::default());
        Self {
            gateway,
            state: CollectionState::default(),
            loading,
        }
    }

    /// Returns the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Returns a snapshot-able view of the owned state.
    pub fn state(&self) -> &CollectionState {
        &self.state
    }

    pub fn records(&self) -> &[MediaRecord] {
        self.state.records()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn cursor(&self) -> &PageCursor {
        self.state.cursor()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.borrow().in_flight
    }

    pub fn loading_state(&self) -> LoadingState {
        *self.loading.borrow()
    }

    /// Subscribe to loading changes.
    pub fn subscribe_loading(&self) -> watch::Receiver<LoadingState> {
        self.loading.subscribe()
    }

    /// Look up a loaded record.
    pub fn get(&self, id: &MediaId) -> Option<&MediaRecord> {
        self.state.records.iter().find(|r| &r.id == id)
    }

    /// The loaded records that pass `filter`, in collection order.
    pub fn filtered(&self, filter: &MediaFilter) -> Vec<&MediaRecord> {
        filter.apply(&self.state.records)
    }

    /// Distinct directors across the loaded records, sorted.
    pub fn directors(&self) -> Vec<String> {
        distinct_directors(&self.state.records)
    }

    /// Fetch one page and merge it.
    ///
    /// Page 1 replaces the collection; any later page is appended. On
    /// failure the collection and cursor are left as they were and the
    /// error message is recorded. Returns whether the load succeeded.
    #[instrument(skip(self))]
    pub async fn load_page(&mut self, page: u32, page_size: u32) -> bool {
        let page = page.max(1);
        let _loading = LoadingGuard::begin(&self.loading);
        self.state.error = None;

        debug!("Loading media page");
        match self.gateway.list_media(page, page_size).await {
            Ok(result) => {
                debug!(
                    received = result.records.len(),
                    total_items = result.pagination.total_items,
                    has_next = result.pagination.has_next,
                    "Media page received"
                );
                if page == 1 {
                    self.state.records = result.records;
                } else {
                    self.state.records.extend(result.records);
                }
                self.state.cursor = result.pagination;
                true
            }
            Err(e) => {
                warn!(error = %e, "Error loading media");
                let message = e.detail().unwrap_or_else(|| match &e {
                    Error::Transport(transport) => transport.to_string(),
                    _ => LOAD_FAILED.to_string(),
                });
                self.state.error = Some(message);
                false
            }
        }
    }

    /// Reload from page 1.
    pub async fn refresh(&mut self, page_size: u32) -> bool {
        self.load_page(1, page_size).await
    }

    /// Load the page after the current one, if the gateway reported one
    /// and no load is in flight. Returns whether a load was attempted
    /// and succeeded.
    pub async fn load_next(&mut self, page_size: u32) -> bool {
        if self.is_loading() {
            return false;
        }
        match self.state.cursor.next_page() {
            Some(page) => self.load_page(page, page_size).await,
            None => false,
        }
    }

    /// Fetch a record straight from the gateway without touching local state.
    pub async fn fetch(&self, id: &MediaId) -> Result<MediaRecord> {
        self.gateway.get_media(id).await
    }

    /// Create a record and prepend the stored version.
    ///
    /// The cursor is left alone: created records sit outside the paging
    /// totals until the next refresh.
    #[instrument(skip(self, draft))]
    pub async fn create(&mut self, draft: &MediaDraft) -> bool {
        self.state.error = None;

        let result = match draft.validate_for_create() {
            Ok(()) => self.gateway.create_media(draft).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(record) => {
                debug!(id = %record.id, "Media created");
                self.state.records.insert(0, record);
                true
            }
            Err(e) => {
                self.fail(CREATE_FAILED, &e);
                false
            }
        }
    }

    /// Apply a partial update and replace the record in place.
    #[instrument(skip(self, draft), fields(%id))]
    pub async fn update(&mut self, id: &MediaId, draft: &MediaDraft) -> bool {
        self.state.error = None;

        let result = match draft.validate_for_update() {
            Ok(()) => self.gateway.update_media(id, draft).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(record) => {
                debug!("Media updated");
                if let Some(slot) = self.state.records.iter_mut().find(|r| &r.id == id) {
                    *slot = record;
                }
                true
            }
            Err(e) => {
                self.fail(UPDATE_FAILED, &e);
                false
            }
        }
    }

    /// Delete a record and remove it from the collection.
    #[instrument(skip(self), fields(%id))]
    pub async fn delete(&mut self, id: &MediaId) -> bool {
        self.state.error = None;

        match self.gateway.delete_media(id).await {
            Ok(()) => {
                debug!("Media deleted");
                self.state.records.retain(|r| &r.id != id);
                true
            }
            Err(e) => {
                self.fail(DELETE_FAILED, &e);
                false
            }
        }
    }

    fn fail(&mut self, fallback: &str, err: &Error) {
        warn!(error = %err, "{}", fallback);
        self.state.error = Some(err.detail().unwrap_or_else(|| fallback.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::testing::{InMemoryGateway, record, records};
    use crate::types::Category;

    fn collection(count: u64) -> MediaCollection<InMemoryGateway> {
        MediaCollection::new(InMemoryGateway::new(records(1, count)))
    }

    fn complete_draft(title: &str) -> MediaDraft {
        MediaDraft::new()
            .with_title(title)
            .with_category(Category::Series)
            .with_director("Vince Gilligan")
            .with_budget("$3M/episode")
            .with_location("Albuquerque")
            .with_duration("5 seasons")
            .with_period("2008-2013")
    }

    fn ids(collection: &MediaCollection<InMemoryGateway>) -> Vec<String> {
        collection
            .records()
            .iter()
            .map(|r| r.id.to_string())
            .collect()
    }

    #[tokio::test]
    async fn starts_empty() {
        let collection = collection(5);
        assert!(collection.records().is_empty());
        assert!(!collection.is_loading());
        assert_eq!(collection.cursor(), &PageCursor::default());
    }

    #[tokio::test]
    async fn second_page_appends_after_first() {
        let mut collection = collection(15);

        assert!(collection.load_page(1, 10).await);
        assert_eq!(collection.records().len(), 10);
        assert!(collection.cursor().has_next);

        assert!(collection.load_page(2, 10).await);
        assert_eq!(collection.records().len(), 15);
        assert!(!collection.cursor().has_next);
        assert_eq!(collection.cursor().current_page, 2);

        let expected: Vec<String> = (1..=15).map(|i| i.to_string()).collect();
        assert_eq!(ids(&collection), expected);
    }

    #[tokio::test]
    async fn first_page_replaces_collection() {
        let mut collection = collection(25);
        collection.load_page(1, 10).await;
        collection.load_page(2, 10).await;
        assert_eq!(collection.records().len(), 20);

        collection.refresh(10).await;
        assert_eq!(collection.records().len(), 10);
        assert_eq!(collection.cursor().current_page, 1);
    }

    #[tokio::test]
    async fn failed_load_keeps_records_and_sets_error() {
        let mut collection = collection(15);
        collection.load_page(1, 10).await;
        let before = collection.state().clone();

        collection.gateway().fail_next(503);
        assert!(!collection.load_page(2, 10).await);

        assert_eq!(collection.records(), before.records());
        assert_eq!(collection.cursor(), before.cursor());
        assert_eq!(collection.error(), Some("boom"));
        assert!(!collection.is_loading());
    }

    #[tokio::test]
    async fn next_success_clears_error() {
        let mut collection = collection(5);
        collection.gateway().fail_next(500);
        collection.load_page(1, 10).await;
        assert!(collection.error().is_some());

        collection.load_page(1, 10).await;
        assert!(collection.error().is_none());
    }

    #[tokio::test]
    async fn load_next_stops_at_last_page() {
        let mut collection = collection(12);
        collection.load_page(1, 10).await;

        assert!(collection.load_next(10).await);
        assert!(!collection.load_next(10).await);
        assert_eq!(collection.gateway().list_calls(), vec![(1, 10), (2, 10)]);
    }

    #[tokio::test]
    async fn every_load_bumps_generation() {
        let mut collection = collection(3);
        let mut rx = collection.subscribe_loading();

        collection.load_page(1, 10).await;
        collection.gateway().fail_next(500);
        collection.load_page(1, 10).await;

        assert!(rx.has_changed().unwrap());
        let state = *rx.borrow_and_update();
        assert_eq!(state, LoadingState { in_flight: false, generation: 2 });
    }

    #[tokio::test]
    async fn cancelled_load_does_not_stick() {
        let mut collection = collection(3);
        collection.gateway().stall_next();

        let result = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            collection.load_page(1, 10),
        )
        .await;

        assert!(result.is_err());
        assert!(!collection.is_loading());
        assert_eq!(collection.loading_state().generation, 1);
        assert!(collection.records().is_empty());
    }

    #[tokio::test]
    async fn loading_flag_is_set_while_request_is_pending() {
        let mut collection = collection(5);
        let rx = collection.subscribe_loading();
        collection.gateway().stall_next();

        {
            let load = collection.load_page(1, 10);
            tokio::pin!(load);
            tokio::select! {
                _ = &mut load => panic!("stalled load completed"),
                _ = tokio::time::sleep(std::time::Duration::from_millis(20)) => {}
            }
            assert_eq!(*rx.borrow(), LoadingState { in_flight: true, generation: 0 });
        }

        assert_eq!(*rx.borrow(), LoadingState { in_flight: false, generation: 1 });
        assert!(!collection.is_loading());
    }

    #[tokio::test]
    async fn create_prepends_without_touching_cursor() {
        let mut collection = collection(3);
        collection.load_page(1, 10).await;
        let cursor = *collection.cursor();

        assert!(collection.create(&complete_draft("Breaking Bad")).await);

        assert_eq!(collection.records().len(), 4);
        assert_eq!(collection.records()[0].title, "Breaking Bad");
        assert_eq!(collection.cursor(), &cursor);
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_gateway() {
        let mut collection = collection(3);
        collection.load_page(1, 10).await;
        let before = collection.state().clone();

        let draft = MediaDraft::new().with_title("Only a title");
        assert!(!collection.create(&draft).await);

        assert_eq!(collection.records(), before.records());
        assert!(collection.error().unwrap().contains("Director is required"));
    }

    #[tokio::test]
    async fn failed_mutations_leave_state_identical() {
        let mut collection = collection(3);
        collection.load_page(1, 10).await;
        let id = collection.records()[1].id.clone();

        collection.gateway().fail_next(500);
        let before = collection.state().clone();
        assert!(!collection.create(&complete_draft("X")).await);
        assert_eq!(collection.records(), before.records());
        assert_eq!(collection.error(), Some("boom"));

        collection.gateway().fail_next(500);
        assert!(
            !collection
                .update(&id, &MediaDraft::new().with_title("Y"))
                .await
        );
        assert_eq!(collection.records(), before.records());

        collection.gateway().fail_next(500);
        assert!(!collection.delete(&id).await);
        assert_eq!(collection.records(), before.records());
        assert_eq!(collection.cursor(), before.cursor());
    }

    #[tokio::test]
    async fn server_detail_wins_over_fallback() {
        let mut collection = collection(1);
        collection.load_page(1, 10).await;

        // The in-memory gateway answers unknown ids with a 404 and a detail.
        assert!(!collection.delete(&MediaId::from(999)).await);
        assert_eq!(collection.error(), Some("Media not found"));
    }

    #[test]
    fn fallback_message_without_server_detail() {
        let mut collection = collection(1);
        let err = Error::from(GatewayError::new(500, None, None));

        collection.fail(DELETE_FAILED, &err);
        assert_eq!(collection.error(), Some("Failed to delete media"));
    }

    #[tokio::test]
    async fn update_replaces_in_place() {
        let mut collection = collection(3);
        collection.load_page(1, 10).await;
        let id = collection.records()[1].id.clone();

        let draft = MediaDraft::new().with_title("Renamed");
        assert!(collection.update(&id, &draft).await);

        assert_eq!(collection.records().len(), 3);
        assert_eq!(collection.records()[1].title, "Renamed");
        assert_eq!(collection.records()[1].id, id);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let mut collection = collection(4);
        collection.load_page(1, 10).await;
        let id = collection.records()[2].id.clone();

        assert!(collection.delete(&id).await);

        assert_eq!(collection.records().len(), 3);
        assert!(collection.get(&id).is_none());
        assert!(collection.error().is_none());
    }

    #[tokio::test]
    async fn operations_clear_previous_error() {
        let mut collection = collection(2);
        collection.load_page(1, 10).await;
        collection.gateway().fail_next(500);
        collection.delete(&MediaId::from(1)).await;
        assert!(collection.error().is_some());

        assert!(collection.delete(&MediaId::from(2)).await);
        assert!(collection.error().is_none());
    }

    #[tokio::test]
    async fn fetch_does_not_mutate() {
        let gateway = InMemoryGateway::new(vec![record(7, "Heat", Category::Film, "Michael Mann")]);
        let collection = MediaCollection::new(gateway);

        let fetched = collection.fetch(&MediaId::from(7)).await.unwrap();
        assert_eq!(fetched.title, "Heat");
        assert!(collection.records().is_empty());
    }
}
