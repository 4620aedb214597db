//! Resource Fetcher
//!
//! Walks every page of a listing and extracts display values from records.

use super::client::ResourceClient;
use super::query::PageRequest;
use super::registry::Operation;
use crate::error::Result;
use crate::model::Entity;
use serde_json::Value;

/// Upper bound on pages walked by [`fetch_all`]
const MAX_PAGES: u32 = 1000;

/// Fetch every record (auto-paginate)
///
/// Uses the unpaged `/all` endpoint when the resource has one.
pub async fn fetch_all<T: Entity>(client: &ResourceClient<T>, page_size: u32) -> Result<Vec<T>> {
    if client.supports(Operation::All) {
        return client.list_all().await;
    }

    let mut all_items = Vec::new();
    let mut request = PageRequest::new(1, page_size);
    let mut previous_first: Option<String> = None;

    for _ in 0..MAX_PAGES {
        let page = client.list(&request).await?;

        let first = page.content.first().map(|item| item.id().to_string());
        if first.is_some() && first == previous_first {
            tracing::warn!(
                "{} page {} repeats the previous page, stopping",
                T::RESOURCE,
                request.page
            );
            break;
        }
        previous_first = first;

        // a short page is the last one even when the server omits `last`
        let short = (page.content.len() as u32) < request.size;
        let done = short
            || !page.has_next()
            || (request.page >= page.total_pages && page.total_pages > 0);
        all_items.extend(page.content);

        if done {
            break;
        }
        request = request.next();
    }

    tracing::debug!("Fetched {} {} records", all_items.len(), T::RESOURCE);
    Ok(all_items)
}

/// Extract a value from JSON using a dot-notation path
pub fn extract_json_value(item: &Value, path: &str) -> String {
    let mut current = item;

    for part in path.split('.') {
        // Handle array index
        let next = match part.parse::<usize>() {
            Ok(idx) => current.get(idx),
            Err(_) => current.get(part),
        };
        current = match next {
            Some(v) => v,
            None => return "-".to_string(),
        };
    }

    match current {
        Value::String(s) if s.is_empty() => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => if *b { "Yes" } else { "No" }.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(_) => "[object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_nested_and_indexed() {
        let item = json!({
            "id": "c1",
            "address": {"city": "Pune", "addressLine2": null},
            "items": [{"productId": "p1"}, {"productId": "p2"}],
            "paid": true,
            "price": 12.5
        });
        assert_eq!(extract_json_value(&item, "address.city"), "Pune");
        assert_eq!(extract_json_value(&item, "address.addressLine2"), "-");
        assert_eq!(extract_json_value(&item, "items.1.productId"), "p2");
        assert_eq!(extract_json_value(&item, "items"), "[2 items]");
        assert_eq!(extract_json_value(&item, "paid"), "Yes");
        assert_eq!(extract_json_value(&item, "price"), "12.5");
        assert_eq!(extract_json_value(&item, "missing.path"), "-");
    }
}
