//! Sales and stock movements
//!
//! `dateTime` values are kept as the server's strings; the backend owns
//! their format and time zone.

use super::common::{Item, PartyType, ProductQuantity};
use super::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date_time: String,
    /// Assigned by the server
    #[serde(default)]
    pub invoice_number: String,
    pub customer_id: String,
    pub employee_id: String,
    pub from_id: String,
    pub from_type: PartyType,
    /// Computed by the server
    #[serde(default)]
    pub retail_sail_price: f64,
    #[serde(default)]
    pub discount: f64,
    /// Computed by the server
    #[serde(default)]
    pub net_amount: f64,
    #[serde(default)]
    pub sale_items: Vec<ProductQuantity>,
    #[serde(default)]
    pub paid: bool,
}

impl Entity for Sale {
    const RESOURCE: &'static str = "sale";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        if self.invoice_number.is_empty() {
            self.id.clone()
        } else {
            self.invoice_number.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningStock {
    #[serde(default)]
    pub id: String,
    pub party_id: String,
    pub party_type: PartyType,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub day_end_id: String,
}

impl Entity for OpeningStock {
    const RESOURCE: &'static str = "opening-stock";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("{} {}", self.party_type, self.party_id)
    }
}

/// Stock moved between two parties; shared shape of take-stock and give-stock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTransfer {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub items: Vec<Item>,
    pub from_id: String,
    pub from_type: PartyType,
    pub to_id: String,
    pub to_type: PartyType,
    #[serde(default)]
    pub date_time: String,
}

/// Stock taken in from a party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TakeStock(pub StockTransfer);

/// Stock handed out to a party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GiveStock(pub StockTransfer);

impl Entity for TakeStock {
    const RESOURCE: &'static str = "take-stock";

    fn id(&self) -> &str {
        &self.0.id
    }

    fn label(&self) -> String {
        format!("{} -> {}", self.0.from_id, self.0.to_id)
    }
}

impl Entity for GiveStock {
    const RESOURCE: &'static str = "give-stock";

    fn id(&self) -> &str {
        &self.0.id
    }

    fn label(&self) -> String {
        format!("{} -> {}", self.0.from_id, self.0.to_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadInProduct {
    pub product_id: String,
    pub quantity_full: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseLoadIn {
    #[serde(default)]
    pub id: String,
    pub warehouse_id: String,
    pub vehicle_number: String,
    pub invoice_number: String,
    #[serde(default)]
    pub date_time: String,
    #[serde(default)]
    pub products: Vec<LoadInProduct>,
}

impl Entity for WarehouseLoadIn {
    const RESOURCE: &'static str = "warehouse-load-in";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.invoice_number.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseLoadOut {
    #[serde(default)]
    pub id: String,
    pub warehouse_id: String,
    pub vehicle_number: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub date_time: String,
    #[serde(default)]
    pub products: Vec<ProductQuantity>,
    /// E-way / release voucher number
    #[serde(default)]
    pub ervnumber: String,
}

impl Entity for WarehouseLoadOut {
    const RESOURCE: &'static str = "warehouse-load-out";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.ervnumber.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleReturn {
    #[serde(default)]
    pub id: String,
    pub customer_id: String,
    #[serde(default)]
    pub date_time: String,
    #[serde(default)]
    pub items: Vec<ProductQuantity>,
    pub to_id: String,
}

impl Entity for SaleReturn {
    const RESOURCE: &'static str = "sale-return";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceDefective {
    #[serde(default)]
    pub id: String,
    pub customer_id: String,
    pub from_id: String,
    pub from_type: PartyType,
    #[serde(default)]
    pub items: Vec<ProductQuantity>,
    #[serde(default)]
    pub date_time: String,
}

impl Entity for ReplaceDefective {
    const RESOURCE: &'static str = "replace-defective";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.id.clone()
    }
}
