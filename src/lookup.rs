//! Name lookups for ids shown in tables and forms

use crate::error::Result;
use crate::model::{Entity, PartyType};
use crate::query::ResourceQueries;
use crate::services::Services;
use futures::future::join_all;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Kinds of record an id can be resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    Party(PartyType),
    Product,
    Customer,
    Employee,
}

impl NameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Party(party) => party.as_str(),
            Self::Product => "PRODUCT",
            Self::Customer => "CUSTOMER",
            Self::Employee => "EMPLOYEE",
        }
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NameKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PRODUCT" => Ok(Self::Product),
            "CUSTOMER" => Ok(Self::Customer),
            "EMPLOYEE" => Ok(Self::Employee),
            other => other
                .parse::<PartyType>()
                .map(Self::Party)
                .map_err(|_| format!("unknown record kind: {}", s)),
        }
    }
}

/// Selector entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Resolves ids to display names through the cached detail queries
#[derive(Debug, Clone, Copy)]
pub struct NameResolver<'a> {
    services: &'a Services,
}

impl<'a> NameResolver<'a> {
    pub fn new(services: &'a Services) -> Self {
        Self { services }
    }

    /// Supplier and warehouse names, vehicle registration numbers
    pub async fn party_name(&self, party: PartyType, id: &str) -> Result<String> {
        match party {
            PartyType::Supplier => label(&self.services.suppliers, id).await,
            PartyType::Warehouse => label(&self.services.warehouses, id).await,
            PartyType::Vehicle => label(&self.services.vehicles, id).await,
        }
    }

    pub async fn name(&self, kind: NameKind, id: &str) -> Result<String> {
        match kind {
            NameKind::Party(party) => self.party_name(party, id).await,
            NameKind::Product => label(&self.services.products, id).await,
            NameKind::Customer => label(&self.services.customers, id).await,
            NameKind::Employee => label(&self.services.employees, id).await,
        }
    }

    /// Like [`name`](Self::name) but shows the id when the lookup fails
    pub async fn name_or_id(&self, kind: NameKind, id: &str) -> String {
        match self.name(kind, id).await {
            Ok(name) if !name.is_empty() => name,
            Ok(_) => id.to_string(),
            Err(e) => {
                tracing::debug!("Name lookup for {} {} failed: {}", kind, id, e);
                id.to_string()
            }
        }
    }

    /// Resolve several ids concurrently, keeping their order
    pub async fn names(&self, kind: NameKind, ids: &[String]) -> Vec<String> {
        join_all(ids.iter().map(|id| self.name_or_id(kind, id))).await
    }
}

async fn label<T: Entity>(queries: &ResourceQueries<T>, id: &str) -> Result<String> {
    Ok(queries.by_id(id).await?.label())
}

/// Selector options for every record of a resource
pub async fn options<T: Entity>(queries: &ResourceQueries<T>) -> Result<Vec<SelectOption>> {
    let records = queries.all().await?;
    Ok(records
        .iter()
        .map(|record| SelectOption {
            value: record.id().to_string(),
            label: record.label(),
        })
        .collect())
}
