//! Employees and their role-specific records

use super::Entity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of an employee; each role has its own creation endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeRole {
    OfficeWorker,
    TruckDriver,
    Supplier,
    WarehouseWorker,
}

impl EmployeeRole {
    pub const ALL: [EmployeeRole; 4] = [
        Self::OfficeWorker,
        Self::TruckDriver,
        Self::Supplier,
        Self::WarehouseWorker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OfficeWorker => "OFFICE_WORKER",
            Self::TruckDriver => "TRUCK_DRIVER",
            Self::Supplier => "SUPPLIER",
            Self::WarehouseWorker => "WAREHOUSE_WORKER",
        }
    }

    /// Resource key of the role-specific endpoint
    pub fn resource_key(&self) -> &'static str {
        match self {
            Self::OfficeWorker => OfficeWorker::RESOURCE,
            Self::TruckDriver => TruckDriver::RESOURCE,
            Self::Supplier => Supplier::RESOURCE,
            Self::WarehouseWorker => WarehouseWorker::RESOURCE,
        }
    }
}

impl fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "OFFICE_WORKER" => Ok(Self::OfficeWorker),
            "TRUCK_DRIVER" => Ok(Self::TruckDriver),
            "SUPPLIER" => Ok(Self::Supplier),
            "WAREHOUSE_WORKER" => Ok(Self::WarehouseWorker),
            other => Err(format!("unknown employee role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub role: EmployeeRole,
}

impl Entity for Employee {
    const RESOURCE: &'static str = "employee";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

impl Entity for Supplier {
    const RESOURCE: &'static str = "supplier";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeWorker {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

impl Entity for OfficeWorker {
    const RESOURCE: &'static str = "office-worker";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckDriver {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub vehicle_ids: Vec<String>,
}

impl Entity for TruckDriver {
    const RESOURCE: &'static str = "truck-driver";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseWorker {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub warehouse_ids: Vec<String>,
}

impl Entity for WarehouseWorker {
    const RESOURCE: &'static str = "warehouse-worker";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
