//! Payload shaping
//!
//! Creation payloads drop the id and any server-computed fields. Update
//! payloads must carry a non-empty id; some endpoints take a reduced body
//! with the id under a resource-specific key.

use super::registry::ResourceDef;
use crate::error::{Error, Result};
use crate::model::Entity;
use serde_json::{Map, Value};

/// Build the POST body for a new record
pub fn create_payload<T: Entity>(def: &ResourceDef, entity: &T) -> Result<Value> {
    let mut value = serde_json::to_value(entity)?;
    if let Value::Object(ref mut map) = value {
        map.remove(&def.id_field);
        for field in &def.create_omit {
            map.remove(field);
        }
    }
    Ok(value)
}

/// Build the PUT body for an existing record
///
/// Fails with a validation error when the record has no id.
pub fn update_payload<T: Entity>(def: &ResourceDef, entity: &T) -> Result<Value> {
    require_id(T::RESOURCE, entity.id())?;
    let value = serde_json::to_value(entity)?;

    let Some(update) = def.update.as_ref() else {
        return Ok(value);
    };

    let Value::Object(source) = value else {
        return Ok(value);
    };

    let mut body = Map::new();
    body.insert(update.id_key.clone(), Value::String(entity.id().to_string()));
    for field in &update.fields {
        if let Some(v) = source.get(field) {
            body.insert(field.clone(), v.clone());
        }
    }
    Ok(Value::Object(body))
}

/// Reject empty or blank identifiers before any request is made
pub fn require_id(resource: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::validation("id", format!("{} id is required", resource)));
    }
    Ok(())
}
