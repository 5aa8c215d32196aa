//! Batch crawling: explicit accumulator state and the per-URL loop
//!
//! Long runs survive isolated faults: any failure while processing one URL
//! is logged and the loop moves on. Structural failures (a bad extraction
//! spec) never reach the loop because specs validate at construction.

use std::collections::HashSet;
use std::path::Path;

use log::{info, warn};

use crate::document::RenderedDocument;
use crate::extract::{extract, ExtractionSpec};
use crate::render::Renderer;
use crate::store;
use crate::table::Table;
use crate::{RenderRequest, Result};

/// Accumulator for discovered URLs with a visited set for dedup.
///
/// Passed explicitly into each processing step; never ambient state. The
/// ordered list preserves discovery order, the set answers membership.
#[derive(Debug, Default)]
pub struct CrawlState {
    urls: Vec<String>,
    visited: HashSet<String>,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previous run's artifact: read the URL array if the file
    /// exists and reconstruct the visited set from it. A missing or
    /// unreadable artifact starts an empty state with a warning; the run
    /// continues either way.
    pub fn load_or_new(path: &Path) -> Self {
        if !path.exists() {
            return Self::new();
        }
        match store::read_json::<Vec<String>>(path) {
            Ok(urls) => {
                info!("Resuming with {} previously collected URLs", urls.len());
                let visited = urls.iter().cloned().collect();
                Self { urls, visited }
            }
            Err(e) => {
                warn!("Could not resume from {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Record a URL; returns true when it was not seen before
    pub fn insert(&mut self, url: &str) -> bool {
        if self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.to_string());
        self.urls.push(url.to_string());
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Discovered URLs in discovery order
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Drop everything collected so far
    pub fn reset(&mut self) {
        self.urls.clear();
        self.visited.clear();
    }

    /// Persist the discovered URLs as a JSON array
    pub fn save(&self, path: &Path) -> Result<()> {
        store::write_json_atomic(path, &self.urls)
    }
}

/// Harvest attribute values (typically hyperlink targets) from a rendered
/// document into the state, keeping only values the filter accepts and
/// skipping anything already visited. Returns the number of new entries.
pub fn collect_links<F>(
    doc: &RenderedDocument,
    selector: &str,
    attr: &str,
    filter: F,
    state: &mut CrawlState,
) -> usize
where
    F: Fn(&str) -> bool,
{
    let mut found = 0;
    for node in doc.select(selector) {
        if let Some(value) = node.attr(attr) {
            if filter(value) && state.insert(value) {
                found += 1;
            }
        }
    }
    info!("Collected {} new link(s), {} total", found, state.len());
    found
}

/// Render and extract each URL in order, handing every result to the sink.
///
/// Per-item failures (unreachable page, render fault) are logged and
/// skipped; there is no retry and no rollback. Returns the number of URLs
/// that produced a table.
pub fn run_batch<R, F>(renderer: &R, urls: &[String], spec: &ExtractionSpec, mut sink: F) -> usize
where
    R: Renderer,
    F: FnMut(&str, Table),
{
    let mut processed = 0;

    for (i, url) in urls.iter().enumerate() {
        info!("[{}/{}] {}", i + 1, urls.len(), url);

        let table = match RenderRequest::new(url)
            .and_then(|request| renderer.render(&request))
            .map(|doc| extract(&doc, spec))
        {
            Ok(table) => table,
            Err(e) => {
                warn!("Skipping {}: {}", url, e);
                continue;
            }
        };

        sink(url, table);
        processed += 1;
    }

    processed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::StaticRenderer;
    use crate::RenderConfig;

    #[test]
    fn test_state_dedupes_and_preserves_order() {
        let mut state = CrawlState::new();
        assert!(state.insert("https://a"));
        assert!(state.insert("https://b"));
        assert!(!state.insert("https://a"));
        assert_eq!(state.urls(), ["https://a", "https://b"]);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_state_reset_clears_everything() {
        let mut state = CrawlState::new();
        state.insert("https://a");
        state.reset();
        assert!(state.is_empty());
        assert!(!state.contains("https://a"));
    }

    #[test]
    fn test_state_resume_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all_urls.json");

        let mut state = CrawlState::new();
        state.insert("https://a");
        state.insert("https://b");
        state.save(&path).unwrap();

        let resumed = CrawlState::load_or_new(&path);
        assert_eq!(resumed.urls(), state.urls());
        assert!(resumed.contains("https://b"));
    }

    #[test]
    fn test_state_resume_from_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all_urls.json");
        std::fs::write(&path, b"not json").unwrap();

        let state = CrawlState::load_or_new(&path);
        assert!(state.is_empty());
    }

    #[test]
    fn test_collect_links_filters_and_dedupes() {
        let doc = RenderedDocument::from_html(
            r#"<a href="/views/1">x</a>
               <a href="/views/1">dup</a>
               <a href="/other">y</a>
               <a>no href</a>"#,
            "https://example.com",
        );
        let mut state = CrawlState::new();
        let found = collect_links(&doc, "a", "href", |h| h.contains("/views/"), &mut state);
        assert_eq!(found, 1);
        assert_eq!(state.urls(), ["/views/1"]);
    }

    #[test]
    fn test_run_batch_skips_failing_items() {
        // Server answers every request with the same small page.
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let base = format!("http://{}", server.server_addr());
        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                let _ = request.respond(tiny_http::Response::from_string(
                    "<html><body><p class='t'>hello</p></body></html>",
                ));
            }
        });

        let renderer = StaticRenderer::new(RenderConfig::default());
        let spec = ExtractionSpec::single("p.t", "text").unwrap();
        let urls = vec![
            format!("{}/one", base),
            "not a url".to_string(),
            format!("{}/two", base),
        ];

        let mut seen = Vec::new();
        let processed = run_batch(&renderer, &urls, &spec, |url, table| {
            seen.push((url.to_string(), table.text_values("text")));
        });

        assert_eq!(processed, 2);
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].1, vec!["hello"]);
    }
}
