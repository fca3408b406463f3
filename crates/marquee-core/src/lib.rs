//! marquee-core - Core types, traits and list state for the marquee media catalog.
//!
//! The catalog itself lives behind a remote gateway (see [`MediaGateway`]).
//! This crate owns everything the client does with it: the record model, the
//! [`MediaCollection`] list controller that merges pages and applies
//! mutations, the [`MediaFilter`] engine, and the [`ScrollTrigger`] that turns
//! scroll positions into "load next page" requests.
//!
//! # Example
//!
//! ```no_run
//! use marquee_core::{MediaCollection, MediaFilter, MediaGateway};
//!
//! # async fn example<G: MediaGateway>(gateway: G) {
//! let mut collection = MediaCollection::new(gateway);
//! collection.load_page(1, 10).await;
//!
//! let filter = MediaFilter::new().with_director("nolan");
//! for record in collection.filtered(&filter) {
//!     println!("{}: {}", record.id, record.title);
//! }
//! # }
//! ```

pub mod collection;
pub mod error;
pub mod filter;
pub mod media;
pub mod scroll;
pub mod traits;
pub mod types;

#[cfg(test)]
mod testing;

pub use collection::{CollectionState, DEFAULT_PAGE_SIZE, LoadingState, MediaCollection};
pub use error::Error;
pub use filter::{CategoryFilter, MediaFilter, distinct_directors};
pub use media::{FieldError, MediaDraft, MediaPage, MediaRecord, PageCursor, PosterUpload};
pub use scroll::{DEFAULT_PROXIMITY, InfiniteScroll, ScrollSample, ScrollTrigger, TriggerState};
pub use traits::MediaGateway;
pub use types::{Category, GatewayUrl, MediaId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
