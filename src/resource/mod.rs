//! Resource abstraction layer
//!
//! A data-driven approach to the inventory API's collections. Resource
//! definitions are loaded from JSON files at compile time; one generic client
//! turns them into typed CRUD calls.
//!
//! # Architecture
//!
//! - [`registry`] - Loads and caches resource definitions from embedded JSON
//! - [`client`] - Generic paged CRUD client per record type
//! - [`payload`] - Shapes create and update bodies
//! - [`fetcher`] - Walks all pages and extracts display values
//!
//! # Resource Definitions
//!
//! Resources are defined in JSON files under `src/resources/`:
//! - `catalog.json` - products, vehicles, warehouses, locations, customers
//! - `people.json` - employees and the role endpoints
//! - `stock.json` - sales and stock movements
//!
//! # Example
//!
//! ```ignore
//! use stockroom::api::ApiClient;
//! use stockroom::model::Product;
//! use stockroom::resource::{PageBase, PageRequest, ResourceClient};
//!
//! async fn first_page(api: ApiClient) -> stockroom::Result<()> {
//!     let products = ResourceClient::<Product>::new(api, PageBase::One)?;
//!     let page = products.list(&PageRequest::new(1, 15)).await?;
//!     println!("{} products", page.total_elements);
//!     Ok(())
//! }
//! ```

pub mod client;
mod employees;
mod fetcher;
pub mod payload;
pub mod query;
mod registry;

pub use client::ResourceClient;
pub use fetcher::{extract_json_value, fetch_all};
pub use query::{PageBase, PageRequest, Sort, SortDirection, DEFAULT_PAGE_SIZE};
pub use registry::*;
