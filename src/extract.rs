//! Selector-driven element extraction
//!
//! An [`ExtractionSpec`] pairs structural selectors with the field names
//! their matches are collected under. Validation is eager: a spec that can
//! be constructed is a spec that can be run, so [`extract`] itself never
//! fails and never touches the network.

use log::debug;

use crate::document::RenderedDocument;
use crate::table::Table;
use crate::{Error, Result};

/// Ordered sequence of (selector, field name) pairs
///
/// Field names need not be unique: repeating a name appends that selector's
/// matches to the same column.
#[derive(Debug, Clone)]
pub struct ExtractionSpec {
    pairs: Vec<(String, String)>,
}

impl ExtractionSpec {
    /// Build a spec from parallel selector and field-name slices.
    ///
    /// Rejects mismatched lengths and the empty list before any document or
    /// network activity.
    pub fn from_pairs(selectors: &[&str], field_names: &[&str]) -> Result<Self> {
        if selectors.len() != field_names.len() {
            return Err(Error::SpecMismatch(format!(
                "selectors: {}, field names: {}",
                selectors.len(),
                field_names.len()
            )));
        }
        if selectors.is_empty() {
            return Err(Error::SpecMismatch(
                "at least one selector is required".to_string(),
            ));
        }

        let pairs = selectors
            .iter()
            .zip(field_names.iter())
            .map(|(s, n)| (s.to_string(), n.to_string()))
            .collect();
        Ok(Self { pairs })
    }

    /// Convenience constructor for a single selector
    pub fn single(selector: &str, field_name: &str) -> Result<Self> {
        Self::from_pairs(&[selector], &[field_name])
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Always false: the constructor rejects empty specs
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Collect every spec'd selector's matches into a name-keyed table.
///
/// Runs each pair in declared order. Zero matches contribute an empty
/// column, so every declared field exists in the result; repeated field
/// names grow row counts, not column counts. Columns of different lengths
/// are left ragged for the caller to reconcile.
pub fn extract(doc: &RenderedDocument, spec: &ExtractionSpec) -> Table {
    let mut table = Table::new();

    for (selector, field) in spec.pairs() {
        let nodes = doc.select(selector);
        debug!("{}: {} match(es) for '{}'", field, nodes.len(), selector);

        table.declare_column(field);
        table.push_nodes(field, nodes);
    }

    table
}
