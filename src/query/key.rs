//! Query keys
//!
//! A key is an ordered list of segments starting with the resource key.
//! Invalidation works on prefixes: `[product, list]` covers every cached
//! product page whatever its page, size, filter or sort.

use crate::resource::Sort;
use std::fmt;

/// Segment separating list pages from single records
pub const LIST: &str = "list";
pub const DETAIL: &str = "detail";
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Key of one list page: resource, page, size, filter and sort
    pub fn list(resource: &str, page: u32, size: u32, query: &str, sort: &Sort) -> Self {
        Self(vec![
            resource.to_string(),
            LIST.to_string(),
            page.to_string(),
            size.to_string(),
            query.to_string(),
            sort.column.clone(),
            sort.direction.to_string(),
        ])
    }

    /// Prefix covering every list page of a resource
    pub fn lists(resource: &str) -> Self {
        Self::new([resource, LIST])
    }

    pub fn detail(resource: &str, id: &str) -> Self {
        Self::new([resource, DETAIL, id])
    }

    /// Key of the unpaged selector list
    pub fn all(resource: &str) -> Self {
        Self::new([resource, ALL])
    }

    /// Prefix covering everything cached for a resource
    pub fn resource(resource: &str) -> Self {
        Self::new([resource])
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_key_segments() {
        let key = QueryKey::list("product", 1, 15, "", &Sort::asc("id"));
        assert_eq!(key.segments(), ["product", "list", "1", "15", "", "id", "asc"]);
        assert!(key.starts_with(&QueryKey::lists("product")));
        assert!(key.starts_with(&QueryKey::resource("product")));
        assert!(!key.starts_with(&QueryKey::lists("vehicle")));
    }

    #[test]
    fn test_detail_is_not_a_list() {
        let key = QueryKey::detail("product", "p1");
        assert!(!key.starts_with(&QueryKey::lists("product")));
        assert_eq!(key.to_string(), "[product, detail, p1]");
    }

    #[test]
    fn test_resource_prefix_does_not_match_longer_names() {
        let key = QueryKey::lists("warehouse-load-in");
        assert!(!key.starts_with(&QueryKey::resource("warehouse")));
    }
}
