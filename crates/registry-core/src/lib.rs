//! # Matchpoint Registry Core
//!
//! In-memory rendezvous registry for multiplayer game sessions.
//!
//! This crate provides:
//!
//! - Session types and registration-time validation (`types`)
//! - A concurrent session map keyed by game code (`registry`)
//! - Time-based expiry driven by a background sweeper (`service`)
//!
//! ## Architecture
//!
//! Registry-core owns all session state and the rules over it; transports
//! adapt their wire format to the operations on [`SessionRegistry`] and
//! carry no session logic of their own. A [`RegistryService`] bundles one
//! registry instance with its sweeper task so state has an explicit owner
//! and an explicit teardown instead of living in process globals.

pub mod error;
pub mod registry;
pub mod service;
pub mod types;

pub use error::{RegistryError, Result};
pub use registry::{RegistryConfig, SessionRegistry};
pub use service::RegistryService;
pub use types::{Session, SessionDescriptor};
