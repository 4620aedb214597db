//! Catalog and master data: products, vehicles, warehouses, locations, customers

use super::common::Address;
use super::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub price: f64,
}

impl Entity for Product {
    const RESOURCE: &'static str = "product";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub id: String,
    /// Registration number
    pub number: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
}

impl Entity for Vehicle {
    const RESOURCE: &'static str = "vehicle";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.number.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub address: Address,
}

impl Entity for Warehouse {
    const RESOURCE: &'static str = "warehouse";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub address: Address,
}

impl Entity for Location {
    const RESOURCE: &'static str = "location";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub address: Address,
}

impl Entity for Customer {
    const RESOURCE: &'static str = "customer";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
