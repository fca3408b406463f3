//! Infinite-scroll trigger.
//!
//! [`ScrollTrigger`] is a two-state machine fed with scroll samples. When
//! the viewport comes within a threshold of the bottom of the content, more
//! pages remain, and no load is running, it asks for the next page and then
//! ignores further samples until that load completes. That single-flight
//! rule is what keeps a burst of scroll events from requesting the same
//! page twice.

use tracing::{debug, trace};

use crate::collection::{LoadingState, MediaCollection};
use crate::media::PageCursor;
use crate::traits::MediaGateway;

/// Distance from the bottom, in scroll units, at which the next page is requested.
pub const DEFAULT_PROXIMITY: f64 = 100.0;

/// One observation of the scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    /// Offset of the top of the viewport into the content.
    pub scroll_top: f64,
    /// Visible height.
    pub viewport_height: f64,
    /// Total height of the scrollable content.
    pub scroll_height: f64,
}

impl ScrollSample {
    pub fn new(scroll_top: f64, viewport_height: f64, scroll_height: f64) -> Self {
        Self {
            scroll_top,
            viewport_height,
            scroll_height,
        }
    }

    /// Returns true if the bottom of the viewport is within `threshold` of the end.
    pub fn is_near_bottom(&self, threshold: f64) -> bool {
        self.scroll_top + self.viewport_height >= self.scroll_height - threshold
    }
}

/// Trigger state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    /// A page was requested when the collection had completed
    /// `since_generation` loads; cleared once a later load finishes.
    FetchPending { since_generation: u64 },
}

/// Turns scroll samples into next-page requests, one at a time.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    state: TriggerState,
    threshold: f64,
    attached: bool,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollTrigger {
    /// A detached trigger with the default proximity threshold.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_PROXIMITY)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            state: TriggerState::Idle,
            threshold,
            attached: false,
        }
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, TriggerState::FetchPending { .. })
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start listening. Samples are ignored until this is called.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop listening and forget any pending request.
    pub fn detach(&mut self) {
        self.attached = false;
        self.state = TriggerState::Idle;
    }

    /// Feed a scroll sample.
    ///
    /// Returns the page to load if this sample moves the trigger from idle
    /// to pending. The caller must then start that load.
    pub fn on_scroll(
        &mut self,
        sample: ScrollSample,
        cursor: &PageCursor,
        loading: LoadingState,
    ) -> Option<u32> {
        if !self.attached || self.is_pending() {
            return None;
        }
        if loading.in_flight || !sample.is_near_bottom(self.threshold) {
            return None;
        }

        let page = cursor.next_page()?;
        debug!(page, "Scrolled near bottom, requesting next page");
        self.state = TriggerState::FetchPending {
            since_generation: loading.generation,
        };
        Some(page)
    }

    /// Feed the collection's loading state.
    ///
    /// A pending trigger returns to idle once a load that started after it
    /// fired has finished, whether it succeeded or failed.
    pub fn on_loading(&mut self, loading: LoadingState) {
        if let TriggerState::FetchPending { since_generation } = self.state
            && !loading.in_flight
            && loading.generation > since_generation
        {
            trace!(generation = loading.generation, "Page load settled");
            self.state = TriggerState::Idle;
        }
    }
}

/// A collection driven by a scroll trigger.
///
/// This is the glue a presentation layer needs: mount it, forward scroll
/// samples, render [`collection`](Self::collection).
#[derive(Debug)]
pub struct InfiniteScroll<G> {
    collection: MediaCollection<G>,
    trigger: ScrollTrigger,
    page_size: u32,
}

impl<G: MediaGateway> InfiniteScroll<G> {
    pub fn new(collection: MediaCollection<G>, page_size: u32) -> Self {
        Self {
            collection,
            trigger: ScrollTrigger::new(),
            page_size,
        }
    }

    pub fn with_trigger(mut self, trigger: ScrollTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn collection(&self) -> &MediaCollection<G> {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut MediaCollection<G> {
        &mut self.collection
    }

    pub fn trigger(&self) -> &ScrollTrigger {
        &self.trigger
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn into_collection(self) -> MediaCollection<G> {
        self.collection
    }

    /// Attach the trigger and load the first page.
    pub async fn mount(&mut self) -> bool {
        self.trigger.attach();
        let loaded = self.collection.load_page(1, self.page_size).await;
        self.trigger.on_loading(self.collection.loading_state());
        loaded
    }

    /// Detach the trigger. Later samples are ignored.
    pub fn unmount(&mut self) {
        self.trigger.detach();
    }

    /// Forward a scroll sample, loading the next page if the trigger fires.
    ///
    /// Returns `None` if no load was issued, otherwise whether it succeeded.
    pub async fn scrolled(&mut self, sample: ScrollSample) -> Option<bool> {
        let page = self.trigger.on_scroll(
            sample,
            self.collection.cursor(),
            self.collection.loading_state(),
        )?;

        let loaded = self.collection.load_page(page, self.page_size).await;
        self.trigger.on_loading(self.collection.loading_state());
        Some(loaded)
    }
}
