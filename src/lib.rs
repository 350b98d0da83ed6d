//! Clean-Up League core: the engine behind a gamified municipal cleanup
//! competition. Neighborhoods register as zones, residents submit before/after
//! cleanup reports, admins verify them, and verified reports feed a scoring
//! engine, period leaderboards, and tiered reward distribution.
//!
//! The crate is a synchronous in-process library; rendering and transport are
//! the caller's concern. All state lives behind a [`Store`] handle backed by
//! SQLite (in-memory by default), and the photo classifier is injectable so
//! scoring stays deterministic under test.

pub mod config;
pub mod error;
pub mod models;
pub mod scoring;
pub mod store;

pub use config::LeagueConfig;
pub use error::{Result, StoreError};
pub use scoring::{Classifier, FixedClassifier, MockClassifier};
pub use store::Store;
