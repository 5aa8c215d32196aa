//! Rendered documents and owned node snapshots
//!
//! A render call can outlive its browser session, so everything a caller can
//! hold is an owned value: the parsed tree itself, and element snapshots
//! copied out of it during selection.

use std::collections::HashMap;

use log::warn;
use scraper::{Html, Selector};

/// A fully loaded, scrolled document tree produced by a renderer
///
/// Owned exclusively by the caller; the browser session that produced it has
/// already been torn down by the time this value exists.
pub struct RenderedDocument {
    html: Html,
    url: String,
}

impl RenderedDocument {
    /// Parse a serialized document. Renderers call this with their final
    /// page source; tests call it with fixture HTML.
    pub fn from_html(html: &str, url: &str) -> Self {
        Self {
            html: Html::parse_document(html),
            url: url.to_string(),
        }
    }

    /// The address this document was rendered from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run a structural selector against the document.
    ///
    /// Never fails: an unparsable selector is logged and yields no matches,
    /// the same as a selector that matches nothing.
    pub fn select(&self, selector: &str) -> Vec<Node> {
        let parsed = match Selector::parse(selector) {
            Ok(s) => s,
            Err(e) => {
                warn!("Unparsable selector '{}': {:?}", selector, e);
                return Vec::new();
            }
        };

        self.html.select(&parsed).map(Node::from_element).collect()
    }
}

impl std::fmt::Debug for RenderedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedDocument")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

/// An owned snapshot of a matched element
///
/// Carries everything downstream consumers read from a match: the tag name,
/// the attribute map, the flattened text content, and the inner HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    tag: String,
    attrs: HashMap<String, String>,
    text: String,
    inner_html: String,
}

impl Node {
    fn from_element(el: scraper::ElementRef<'_>) -> Self {
        let attrs = el
            .value()
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self {
            tag: el.value().name().to_string(),
            attrs,
            text: el.text().collect::<String>(),
            inner_html: el.inner_html(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value, if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Attribute value, or `default` when absent
    pub fn attr_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attr(name).unwrap_or(default)
    }

    /// Flattened text content of the element and its descendants
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <a class="item" href="/a">first</a>
        <a class="item" href="/b">second</a>
        <span id="price" data-won="1000">1,000</span>
    </body></html>"#;

    #[test]
    fn test_select_collects_matches_in_order() {
        let doc = RenderedDocument::from_html(PAGE, "https://example.com");
        let nodes = doc.select("a.item");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].attr("href"), Some("/a"));
        assert_eq!(nodes[1].text(), "second");
    }

    #[test]
    fn test_select_no_match_is_empty() {
        let doc = RenderedDocument::from_html(PAGE, "https://example.com");
        assert!(doc.select("div.missing").is_empty());
    }

    #[test]
    fn test_unparsable_selector_yields_no_matches() {
        let doc = RenderedDocument::from_html(PAGE, "https://example.com");
        assert!(doc.select("a[").is_empty());
    }

    #[test]
    fn test_attr_or_default() {
        let doc = RenderedDocument::from_html(PAGE, "https://example.com");
        let nodes = doc.select("#price");
        assert_eq!(nodes[0].attr_or("data-won", ""), "1000");
        assert_eq!(nodes[0].attr_or("href", ""), "");
        assert_eq!(nodes[0].tag(), "span");
    }
}
