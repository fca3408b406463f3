//! Media records, drafts and pagination metadata.
//!
//! This module defines the data exchanged with the gateway.
//! The operations themselves are methods on [`MediaGateway`](crate::MediaGateway).

mod draft;
mod page;
mod record;

pub use draft::{FieldError, MediaDraft, PosterUpload};
pub use page::{MediaPage, PageCursor};
pub use record::MediaRecord;
