//! Name-keyed tabular extraction results
//!
//! A [`Table`] maps field names to ordered columns of extracted nodes.
//! Columns keep insertion order, cells are optional so merged batches can
//! carry placeholder rows, and nothing here reconciles row alignment across
//! differently named columns; that is the caller's responsibility.

use indexmap::IndexMap;
use serde_json::json;

use crate::document::Node;

/// Extraction result: field name → ordered column of optional nodes
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: IndexMap<String, Vec<Option<Node>>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append nodes under `field`. A new field becomes a new column; an
    /// existing field grows its row count — repeated names never produce
    /// additional columns.
    pub fn push_nodes(&mut self, field: &str, nodes: Vec<Node>) {
        let column = self.columns.entry(field.to_string()).or_default();
        column.extend(nodes.into_iter().map(Some));
    }

    /// Append a row of placeholders, one per existing column
    pub fn push_placeholder_row(&mut self) {
        for column in self.columns.values_mut() {
            column.push(None);
        }
    }

    /// Declare a column without contributing any rows
    pub fn declare_column(&mut self, field: &str) {
        self.columns.entry(field.to_string()).or_default();
    }

    /// Column names in declaration order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, field: &str) -> Option<&[Option<Node>]> {
        self.columns.get(field).map(Vec::as_slice)
    }

    /// Length of a column; zero when the column does not exist
    pub fn column_len(&self, field: &str) -> usize {
        self.columns.get(field).map_or(0, Vec::len)
    }

    /// Height of the table: the longest column. Columns may be ragged.
    pub fn row_count(&self) -> usize {
        self.columns.values().map(Vec::len).max().unwrap_or(0)
    }

    /// A table with no rows is empty, even when columns are declared
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Attribute values down a column. Missing attributes and placeholder
    /// cells both read as the empty string.
    pub fn attr_values(&self, field: &str, attr: &str) -> Vec<String> {
        self.columns
            .get(field)
            .map(|col| {
                col.iter()
                    .map(|cell| {
                        cell.as_ref()
                            .and_then(|n| n.attr(attr))
                            .unwrap_or("")
                            .to_string()
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Flattened text content down a column; placeholders read as empty
    pub fn text_values(&self, field: &str) -> Vec<String> {
        self.columns
            .get(field)
            .map(|col| {
                col.iter()
                    .map(|cell| cell.as_ref().map(|n| n.text().to_string()).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// JSON projection of each column's text values, for the CLI and for
    /// flat-file artifacts.
    pub fn to_json_texts(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for name in self.columns.keys() {
            map.insert(name.clone(), json!(self.text_values(name)));
        }
        serde_json::Value::Object(map)
    }
}

/// Concatenate a batch of independently extracted tables.
///
/// The column set comes from the first non-empty table. Every empty input is
/// replaced by exactly one all-placeholder row so that a batch of N pages
/// always contributes N recognizable blocks, even on total extraction
/// failure for a page. Non-empty inputs contribute a rectangular block the
/// height of their longest column, short columns padded with placeholders.
/// Rows are renumbered contiguously by construction. An all-empty batch
/// merges to the empty table.
pub fn merge(tables: Vec<Table>) -> Table {
    let names: Vec<String> = match tables.iter().find(|t| !t.is_empty()) {
        Some(first) => first.column_names().map(str::to_string).collect(),
        None => return Table::new(),
    };

    let mut out = Table::new();
    for name in &names {
        out.declare_column(name);
    }

    for table in &tables {
        if table.is_empty() {
            out.push_placeholder_row();
            continue;
        }

        let height = table.row_count();
        for name in &names {
            let column = out.columns.entry(name.clone()).or_default();
            let mut contributed = 0;
            if let Some(cells) = table.column(name) {
                column.extend(cells.iter().cloned());
                contributed = cells.len();
            }
            for _ in contributed..height {
                column.push(None);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::RenderedDocument;

    fn nodes(n: usize) -> Vec<Node> {
        let html = "<a href='/x'>x</a>".repeat(n);
        RenderedDocument::from_html(&html, "https://t").select("a")
    }

    fn table_with(field: &str, n: usize) -> Table {
        let mut t = Table::new();
        t.push_nodes(field, nodes(n));
        t
    }

    #[test]
    fn test_repeated_field_grows_rows_not_columns() {
        let mut t = Table::new();
        t.push_nodes("tags", nodes(3));
        t.push_nodes("tags", nodes(2));
        assert_eq!(t.column_names().count(), 1);
        assert_eq!(t.column_len("tags"), 5);
    }

    #[test]
    fn test_missing_column_reads_empty() {
        let t = table_with("tags", 1);
        assert_eq!(t.column_len("absent"), 0);
        assert!(t.attr_values("absent", "href").is_empty());
    }

    #[test]
    fn test_attr_values_fall_back_to_empty_string() {
        let t = table_with("links", 2);
        assert_eq!(t.attr_values("links", "href"), vec!["/x", "/x"]);
        assert_eq!(t.attr_values("links", "title"), vec!["", ""]);
    }

    #[test]
    fn test_merge_replaces_empty_tables_with_one_placeholder_row() {
        let merged = merge(vec![table_with("a", 1), Table::new(), table_with("a", 1)]);
        assert_eq!(merged.row_count(), 3);
        let col = merged.column("a").unwrap();
        assert!(col[0].is_some());
        assert!(col[1].is_none());
        assert!(col[2].is_some());
    }

    #[test]
    fn test_merge_row_count_matches_input_count_for_single_row_tables() {
        let inputs = vec![
            table_with("a", 1),
            Table::new(),
            table_with("a", 1),
            Table::new(),
        ];
        assert_eq!(merge(inputs).row_count(), 4);
    }

    #[test]
    fn test_merge_all_empty_is_empty() {
        assert!(merge(vec![Table::new(), Table::new()]).is_empty());
        assert!(merge(Vec::new()).is_empty());
    }

    #[test]
    fn test_merge_pads_missing_columns_per_block() {
        let mut first = Table::new();
        first.push_nodes("a", nodes(2));
        first.push_nodes("b", nodes(2));

        let second = table_with("a", 1); // no "b" column

        let merged = merge(vec![first, second]);
        assert_eq!(merged.column_len("a"), 3);
        assert_eq!(merged.column_len("b"), 3);
        assert!(merged.column("b").unwrap()[2].is_none());
    }
}
