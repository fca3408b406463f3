//! Core catalog types.
//!
//! These types enforce their invariants at construction time,
//! ensuring invalid states are unrepresentable.

mod category;
mod gateway_url;
mod media_id;

pub use category::Category;
pub use gateway_url::{DEFAULT_GATEWAY, GatewayUrl};
pub use media_id::MediaId;
