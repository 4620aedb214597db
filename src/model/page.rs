//! Paged response envelope

use serde::{Deserialize, Serialize};

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    /// Page number as reported by the server
    #[serde(default)]
    pub number: u32,
    /// Requested page size
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub number_of_elements: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub empty: bool,
    #[serde(default)]
    pub sort: SortInfo,
    #[serde(default)]
    pub pageable: Option<Pageable>,
}

/// Sort metadata of a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortInfo {
    #[serde(default)]
    pub empty: bool,
    #[serde(default)]
    pub sorted: bool,
    #[serde(default)]
    pub unsorted: bool,
}

/// Pageable metadata of a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub sort: SortInfo,
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub paged: bool,
    #[serde(default)]
    pub unpaged: bool,
}

impl<T> Page<T> {
    /// Build a single page holding every item, as a server would for a small table
    pub fn from_items(content: Vec<T>, number: u32, size: u32) -> Self {
        let len = content.len() as u32;
        Self {
            total_elements: u64::from(len),
            total_pages: u32::from(len > 0),
            number,
            size,
            number_of_elements: len,
            first: true,
            last: true,
            empty: len == 0,
            sort: SortInfo::default(),
            pageable: None,
            content,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether another page follows this one
    pub fn has_next(&self) -> bool {
        !self.last && !self.content.is_empty()
    }

    /// Transform the content while keeping the metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
            sort: self.sort,
            pageable: self.pageable,
        }
    }
}
