//! Plain-text tables for terminal output

use crate::model::Page;
use crate::resource::{extract_json_value, ColumnDef, ResourceDef};
use serde_json::Value;
use std::fmt::Write;

/// Render rows under the resource's configured columns
pub fn render_rows(def: &ResourceDef, rows: &[Value]) -> String {
    let mut out = String::new();

    let header: Vec<String> = def
        .columns
        .iter()
        .map(|col| pad(&col.header.to_uppercase(), col))
        .collect();
    let _ = writeln!(out, "{}", header.join("  ").trim_end());

    for row in rows {
        let cells: Vec<String> = def
            .columns
            .iter()
            .map(|col| pad(&extract_json_value(row, &col.json_path), col))
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }

    out
}

/// Render a page followed by a paging footer
pub fn render_page(def: &ResourceDef, page: &Page<Value>, page_number: u32) -> String {
    let mut out = render_rows(def, &page.content);
    let total_pages = page.total_pages.max(1);
    let _ = writeln!(
        out,
        "\n{} of {} {} (page {} of {})",
        page.content.len(),
        page.total_elements,
        def.display_name.to_lowercase(),
        page_number,
        total_pages
    );
    out
}

fn pad(value: &str, col: &ColumnDef) -> String {
    let width = usize::from(col.width);
    format!("{:<width$}", truncate_string(value, width), width = width)
}

/// Truncate string for display (Unicode-safe)
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::get_resource;
    use serde_json::json;

    #[test]
    fn test_rows_follow_columns() {
        let def = get_resource("product").unwrap();
        let rows = vec![
            json!({"id": "p1", "name": "14.2kg Cylinder", "price": 1100.0}),
            json!({"id": "p2", "name": "Regulator", "price": 250}),
        ];
        let out = render_rows(def, &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[0].contains("PRICE"));
        assert!(lines[1].contains("14.2kg Cylinder"));
        assert!(lines[2].ends_with("250"));
    }

    #[test]
    fn test_page_footer() {
        let def = get_resource("product").unwrap();
        let page = Page::from_items(vec![json!({"id": "p1", "name": "Valve", "price": 5})], 1, 15);
        let out = render_page(def, &page, 1);
        assert!(out.contains("1 of 1 products (page 1 of 1)"));
    }

    #[test]
    fn test_truncate_is_unicode_safe() {
        assert_eq!(truncate_string("héllo wörld", 8), "héllo...");
        assert_eq!(truncate_string("short", 8), "short");
    }
}
