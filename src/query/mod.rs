//! Cache-aware query and mutation layer
//!
//! - [`key`] - Hierarchical cache keys
//! - [`cache`] - Shared result cache with per-key request deduplication
//! - [`hooks`] - Per-resource queries and mutations with invalidation

pub mod cache;
pub mod hooks;
pub mod key;

pub use cache::{QueryCache, QueryState};
pub use hooks::{Notifier, ResourceQueries};
pub use key::QueryKey;
