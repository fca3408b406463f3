//! Core traits for gateway behavior.

mod gateway;

pub use gateway::MediaGateway;
