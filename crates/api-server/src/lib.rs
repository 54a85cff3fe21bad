//! # Matchpoint API Server
//!
//! JSON-over-HTTP transport for the Matchpoint session registry.
//!
//! The crate is transport glue only: it parses the wire format, calls into
//! [`matchpoint_registry_core`], and shapes responses. Session rules live in
//! registry-core, so another transport could sit in front of the same
//! registry without touching this crate.

pub mod api;
pub mod config;

pub use api::{AppState, create_router};
pub use config::ServerConfig;
