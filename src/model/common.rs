//! Value types shared by several entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Postal address embedded in warehouses, locations and customers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_line1)?;
        if let Some(line2) = self.address_line2.as_deref().filter(|l| !l.is_empty()) {
            write!(f, ", {}", line2)?;
        }
        write!(f, ", {}, {} {}", self.city, self.state, self.pincode)
    }
}

/// Kind of party that holds or moves stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyType {
    Supplier,
    Warehouse,
    Vehicle,
}

impl PartyType {
    pub const ALL: [PartyType; 3] = [Self::Supplier, Self::Warehouse, Self::Vehicle];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supplier => "SUPPLIER",
            Self::Warehouse => "WAREHOUSE",
            Self::Vehicle => "VEHICLE",
        }
    }
}

impl fmt::Display for PartyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SUPPLIER" => Ok(Self::Supplier),
            "WAREHOUSE" => Ok(Self::Warehouse),
            "VEHICLE" => Ok(Self::Vehicle),
            other => Err(format!("unknown party type: {}", other)),
        }
    }
}

/// Stock line counted by cylinder state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub product_id: String,
    #[serde(default)]
    pub quantity_full: u32,
    #[serde(default)]
    pub quantity_empty: u32,
    #[serde(default)]
    pub quantity_defective: u32,
}

impl Item {
    pub fn total(&self) -> u32 {
        self.quantity_full + self.quantity_empty + self.quantity_defective
    }
}

/// Product line with a single quantity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuantity {
    pub product_id: String,
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_type_wire_format() {
        assert_eq!(serde_json::to_string(&PartyType::Warehouse).unwrap(), "\"WAREHOUSE\"");
        let parsed: PartyType = serde_json::from_str("\"VEHICLE\"").unwrap();
        assert_eq!(parsed, PartyType::Vehicle);
        assert_eq!("supplier".parse::<PartyType>().unwrap(), PartyType::Supplier);
        assert!("truck".parse::<PartyType>().is_err());
    }

    #[test]
    fn test_address_display_skips_empty_line2() {
        let mut address = Address {
            address_line1: "12 Dock Road".into(),
            address_line2: Some(String::new()),
            city: "Kochi".into(),
            state: "Kerala".into(),
            pincode: "682001".into(),
        };
        assert_eq!(address.to_string(), "12 Dock Road, Kochi, Kerala 682001");
        address.address_line2 = Some("Gate 4".into());
        assert_eq!(address.to_string(), "12 Dock Road, Gate 4, Kochi, Kerala 682001");
    }

    #[test]
    fn test_item_defaults_missing_quantities() {
        let item: Item = serde_json::from_str(r#"{"productId":"p1","quantityFull":3}"#).unwrap();
        assert_eq!(item.quantity_empty, 0);
        assert_eq!(item.total(), 3);
    }
}
