//! Form submission with uniqueness checks
//!
//! Resources with an `exists` probe guard one field against duplicates. On
//! create the probe always runs; on edit it runs only when the field changed.

use crate::error::{Error, Result};
use crate::model::Entity;
use crate::query::ResourceQueries;
use crate::resource::ResourceDef;
use serde_json::Value;

/// A field that must be unique across the resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueField {
    /// JSON name of the field, e.g. `phoneNumber`
    pub field: String,
    pub message: String,
}

impl UniqueField {
    pub fn for_resource(def: &ResourceDef) -> Option<Self> {
        def.exists.as_ref().map(|probe| Self {
            field: probe.field.clone(),
            message: probe.message.clone(),
        })
    }

    /// Current value of the field as sent to the probe
    pub fn value_of<T: Entity>(&self, entity: &T) -> Result<Option<String>> {
        let value = serde_json::to_value(entity)?;
        Ok(match value.get(&self.field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }
}

/// Run the uniqueness probe for a draft
///
/// `original` is the record being edited, `None` when creating.
pub async fn check_unique<T: Entity>(
    queries: &ResourceQueries<T>,
    draft: &T,
    original: Option<&T>,
) -> Result<()> {
    let Some(rule) = UniqueField::for_resource(queries.client().definition()) else {
        return Ok(());
    };
    let Some(value) = rule.value_of(draft)? else {
        return Ok(());
    };

    if let Some(original) = original {
        if rule.value_of(original)?.as_deref() == Some(value.as_str()) {
            return Ok(());
        }
    }

    if queries.exists(&value).await? {
        tracing::debug!("{} '{}' already taken for {}", rule.field, value, T::RESOURCE);
        return Err(Error::validation(rule.field, rule.message));
    }
    Ok(())
}

/// Validate then create (no `original`) or update (with `original`)
pub async fn submit<T: Entity>(
    queries: &ResourceQueries<T>,
    draft: &T,
    original: Option<&T>,
) -> Result<T> {
    check_unique(queries, draft, original).await?;
    match original {
        Some(_) => queries.update(draft).await,
        None => queries.create(draft).await,
    }
}
