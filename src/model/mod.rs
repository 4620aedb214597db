//! Domain records exchanged with the inventory API
//!
//! Every record carries a server-assigned string `id`. It is empty until the
//! server has created the record; creation payloads never send it and
//! update payloads always do (see [`crate::resource::payload`]).

mod catalog;
mod common;
mod page;
mod people;
mod stock;

pub use catalog::{Customer, Location, Product, Vehicle, Warehouse};
pub use common::{Address, Item, PartyType, ProductQuantity};
pub use page::{Page, Pageable, SortInfo};
pub use people::{Employee, EmployeeRole, OfficeWorker, Supplier, TruckDriver, WarehouseWorker};
pub use stock::{
    GiveStock, LoadInProduct, OpeningStock, ReplaceDefective, Sale, SaleReturn, StockTransfer,
    TakeStock, WarehouseLoadIn, WarehouseLoadOut,
};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// A record served by one REST collection
pub trait Entity: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Key of the resource definition describing the endpoint
    const RESOURCE: &'static str;

    /// Server-assigned identifier, empty when not yet created
    fn id(&self) -> &str;

    /// Human-readable name used by selectors and lookups
    fn label(&self) -> String;

    fn has_id(&self) -> bool {
        !self.id().trim().is_empty()
    }
}
