//! Paging and sorting parameters

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Sort direction sent as `sortDirection`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction: {}", other)),
        }
    }
}

/// Sort column and direction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sort {
    pub column: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// How the server numbers its pages
///
/// Callers always count pages from 1. With `One` the page number is sent
/// unchanged; with `Zero` it is shifted down by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageBase {
    #[default]
    One,
    Zero,
}

impl PageBase {
    /// Convert a caller page number to the server's numbering
    pub fn to_server(self, page: u32) -> u32 {
        match self {
            Self::One => page,
            Self::Zero => page.saturating_sub(1),
        }
    }
}

/// One page request: page number as the caller counts it, size and sort
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: Sort::asc("id"),
        }
    }

    pub fn sorted(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Same request for the following page
    pub fn next(&self) -> Self {
        Self {
            page: self.page + 1,
            ..self.clone()
        }
    }

    /// Query pairs in the order the server documents them
    pub fn to_query(&self, base: PageBase) -> Vec<(String, String)> {
        vec![
            ("size".to_string(), self.size.to_string()),
            ("page".to_string(), base.to_server(self.page).to_string()),
            ("sortColumn".to_string(), self.sort.column.clone()),
            ("sortDirection".to_string(), self.sort.direction.to_string()),
        ]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs() {
        let req = PageRequest::new(2, 15).sorted(Sort::desc("name"));
        let pairs = req.to_query(PageBase::One);
        assert_eq!(
            pairs,
            vec![
                ("size".to_string(), "15".to_string()),
                ("page".to_string(), "2".to_string()),
                ("sortColumn".to_string(), "name".to_string()),
                ("sortDirection".to_string(), "desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_zero_based_server() {
        let req = PageRequest::new(1, 10);
        assert_eq!(req.to_query(PageBase::Zero)[1].1, "0");
        assert_eq!(PageBase::Zero.to_server(0), 0);
    }

    #[test]
    fn test_size_never_zero() {
        assert_eq!(PageRequest::new(1, 0).size, 1);
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("up".parse::<SortDirection>().is_err());
    }
}
