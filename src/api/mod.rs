//! REST API plumbing
//!
//! - [`http`] - reqwest wrapper with status handling and log sanitizing
//! - [`client`] - base-URL-bound client shared by every resource
//!
//! # Example
//!
//! ```ignore
//! use stockroom::api::{ApiClient, NO_QUERY};
//! use stockroom::config::Config;
//!
//! async fn example() -> stockroom::Result<()> {
//!     let client = ApiClient::from_config(&Config::load())?;
//!     let exists: bool = client.get("/api/product/name-exists/Cylinder", NO_QUERY).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;

pub use client::ApiClient;
pub use http::{ApiHttpClient, NO_QUERY};
