//! Typed client for the stockroom inventory API
//!
//! - [`resource`] - generic paged CRUD over every REST collection
//! - [`query`] - cached queries and mutations with invalidation
//! - [`services`] and [`dependency`] - service wiring

pub mod api;
pub mod config;
pub mod dependency;
pub mod error;
pub mod forms;
pub mod lookup;
pub mod model;
pub mod notification;
pub mod query;
pub mod resource;
pub mod services;
pub mod table;

pub use error::{Error, Result};
pub use services::Services;
