//! marquee-http - HTTP-backed media gateway.
//!
//! [`HttpGateway`] implements [`MediaGateway`](marquee_core::MediaGateway)
//! against the catalog's REST API: paginated listing under `/media`, single
//! records under `/media/{id}`, JSON bodies for plain drafts and multipart
//! forms when a poster is attached.

mod client;
mod endpoints;
mod gateway;

pub use client::HttpClient;
pub use gateway::HttpGateway;
