//! Resource Registry - Load resource definitions from JSON
//!
//! Every REST collection is described once in the embedded JSON files:
//! endpoint, supported operations, search and uniqueness probes, payload
//! shaping and display columns. The generic client reads these definitions
//! instead of carrying one hand-written service per entity.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Embedded resource JSON files (compiled into the binary)
const RESOURCE_FILES: &[&str] = &[
    include_str!("../resources/catalog.json"),
    include_str!("../resources/people.json"),
    include_str!("../resources/stock.json"),
];

/// Operations an endpoint may offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    Search,
    /// Unpaged short list at `/all`
    All,
    Exists,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Search => "search",
            Self::All => "all",
            Self::Exists => "exists",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnDef {
    pub header: String,
    pub json_path: String,
    pub width: u16,
}

/// Free-text or date filter endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SearchDef {
    /// Path below the endpoint, e.g. `search` or `date`
    pub path: String,
    /// Query parameter carrying the filter value
    pub param: String,
}

/// Uniqueness probe, e.g. `GET /name-exists/{value}`
#[derive(Debug, Clone, Deserialize)]
pub struct ExistsDef {
    pub path: String,
    /// Form field the probe guards
    pub field: String,
    /// Field error shown when the value is taken
    pub message: String,
}

/// Shape of the PUT payload when it is not the full record
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDef {
    /// Key the record id is sent under
    pub id_key: String,
    /// Fields sent besides the id
    pub fields: Vec<String>,
}

/// Resource definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDef {
    pub display_name: String,
    /// Collection path, e.g. `/api/product`
    pub endpoint: String,
    pub operations: Vec<Operation>,
    /// Path segment placed before the id on single-record GETs
    #[serde(default)]
    pub get_prefix: Option<String>,
    #[serde(default)]
    pub search: Option<SearchDef>,
    #[serde(default)]
    pub exists: Option<ExistsDef>,
    #[serde(default = "default_id_field")]
    pub id_field: String,
    #[serde(default = "default_name_field")]
    pub name_field: String,
    #[serde(default = "default_id_field")]
    pub default_sort: String,
    /// Server-computed fields dropped from creation payloads
    #[serde(default)]
    pub create_omit: Vec<String>,
    #[serde(default)]
    pub update: Option<UpdateDef>,
    pub columns: Vec<ColumnDef>,
}

fn default_id_field() -> String {
    "id".to_string()
}

fn default_name_field() -> String {
    "name".to_string()
}

impl ResourceDef {
    /// Check if the endpoint offers an operation
    pub fn supports(&self, op: Operation) -> bool {
        self.operations.contains(&op)
    }

    /// Collection path with a trailing slash, used for list, create and update
    pub fn collection_path(&self) -> String {
        format!("{}/", self.endpoint.trim_end_matches('/'))
    }

    /// Path of a sub-endpoint, e.g. `search` or `all`
    pub fn sub_path(&self, segment: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), segment.trim_matches('/'))
    }

    /// Path of a single record
    pub fn item_path(&self, id: &str) -> String {
        let id = urlencoding::encode(id);
        match self.get_prefix.as_deref() {
            Some(prefix) => self.sub_path(&format!("{}/{}", prefix, id)),
            None => self.sub_path(&id),
        }
    }

    /// Path of a record for DELETE; the GET prefix does not apply
    pub fn delete_path(&self, id: &str) -> String {
        self.sub_path(&urlencoding::encode(id))
    }
}

/// Root structure of resources/*.json
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    pub resources: HashMap<String, ResourceDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<ResourceConfig> = OnceLock::new();

/// Get the resource registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static ResourceConfig {
    REGISTRY.get_or_init(|| {
        let mut final_config = ResourceConfig {
            resources: HashMap::new(),
        };

        for content in RESOURCE_FILES {
            let partial: ResourceConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded resource JSON: {}", e));
            final_config.resources.extend(partial.resources);
        }

        final_config
    })
}

/// Get a resource definition by key
pub fn get_resource(key: &str) -> Option<&'static ResourceDef> {
    get_registry().resources.get(key)
}

/// Get all resource keys, sorted
pub fn get_all_resource_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = get_registry()
        .resources
        .keys()
        .map(|s| s.as_str())
        .collect();
    keys.sort_unstable();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_loads_successfully() {
        let registry = get_registry();
        assert_eq!(registry.resources.len(), 18);
    }

    #[test]
    fn test_product_resource_exists() {
        let resource = get_resource("product").unwrap();
        assert_eq!(resource.display_name, "Products");
        assert_eq!(resource.endpoint, "/api/product");
        assert!(resource.supports(Operation::Search));
        assert_eq!(resource.exists.as_ref().unwrap().path, "name-exists");
        assert_eq!(resource.default_sort, "id");
    }

    #[test]
    fn test_paths() {
        let product = get_resource("product").unwrap();
        assert_eq!(product.collection_path(), "/api/product/");
        assert_eq!(product.item_path("p 1"), "/api/product/p%201");
        assert_eq!(product.sub_path("search"), "/api/product/search");

        let sale = get_resource("sale").unwrap();
        assert_eq!(sale.item_path("s1"), "/api/sale/id/s1");
        assert_eq!(sale.delete_path("s1"), "/api/sale/s1");
    }

    #[test]
    fn test_role_endpoints_are_create_only() {
        for key in ["office-worker", "truck-driver", "warehouse-worker"] {
            let def = get_resource(key).unwrap();
            assert!(def.supports(Operation::Create));
            assert!(!def.supports(Operation::Update), "{}", key);
            assert!(!def.supports(Operation::List), "{}", key);
        }
    }

    #[test]
    fn test_search_and_exists_declared_consistently() {
        for key in get_all_resource_keys() {
            let def = get_resource(key).unwrap();
            assert_eq!(def.supports(Operation::Search), def.search.is_some(), "{}", key);
            assert_eq!(def.supports(Operation::Exists), def.exists.is_some(), "{}", key);
            assert!(!def.columns.is_empty(), "{}", key);
        }
    }
}
