//! trendcrawl
//!
//! A scroll-and-extract crawling toolkit for trend research: drive a page to
//! its fully scrolled state, pull named node sets out of it with structural
//! selectors, and post-process the results into tables, link lists, and
//! keyword tallies.
//!
//! # Features
//!
//! - **Browser backend** (default): headless Chrome session per render with a
//!   scroll-stabilization loop
//! - **Static backend**: plain HTTP fetch for pages that need no scrolling
//! - **Safe contracts**: reachability and spec validation happen eagerly,
//!   before any browser session exists
//!
//! # Example
//!
//! ```no_run
//! use trendcrawl::{ExtractionSpec, RenderConfig, RenderRequest, Renderer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let renderer = trendcrawl::new_renderer(RenderConfig::default());
//! let request = RenderRequest::new("https://example.com")?.scroll_limit(3);
//! let doc = renderer.render(&request)?;
//!
//! let spec = ExtractionSpec::from_pairs(
//!     &["div.list_item > a", "span.price"],
//!     &["links", "prices"],
//! )?;
//! let table = trendcrawl::extract(&doc, &spec);
//! println!("{} links", table.column_len("links"));
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

pub mod error;
pub use error::{Error, Result};

pub mod document;
pub mod render;

#[cfg(feature = "browser")]
pub mod chrome;

pub mod extract;
pub mod table;

pub mod batch;
pub mod clean;
pub mod keywords;
pub mod partition;
pub mod store;

pub use batch::CrawlState;
pub use clean::clean;
pub use document::{Node, RenderedDocument};
pub use extract::{extract, ExtractionSpec};
pub use keywords::{KeywordCounter, Tokenizer, WhitespaceTokenizer};
pub use render::{Renderer, StaticRenderer};
pub use table::{merge, Table};

#[cfg(feature = "browser")]
pub use chrome::ChromeRenderer;

/// Configuration shared by every render a renderer performs
///
/// The defaults mirror the crawl scripts this crate grew out of: a fixed
/// desktop user-agent string, a generous viewport, and a five second
/// page-load timeout.
///
/// # Examples
///
/// ```
/// let cfg = trendcrawl::RenderConfig::default();
/// assert!(cfg.user_agent.contains("Mozilla"));
/// ```
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// User agent string to send with every request
    pub user_agent: String,
    /// Viewport dimensions for the browser backend
    pub viewport: Viewport,
    /// Timeout for page navigation in milliseconds
    pub nav_timeout_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            viewport: Viewport::default(),
            nav_timeout_ms: 5000,
        }
    }
}

/// Viewport dimensions
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// An immutable description of a single render call
///
/// Created per call; the address is validated at construction so renderers
/// never see a syntactically invalid URL.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    address: String,
    stabilization_interval: Duration,
    timeout_budget: Duration,
    scroll_limit: u32,
}

impl RenderRequest {
    /// Build a request for `address` with default stabilization settings
    /// (100ms re-check interval, 5s budget, unbounded scrolling).
    pub fn new(address: &str) -> Result<Self> {
        let parsed = url::Url::parse(address)
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", address, e)))?;
        Ok(Self {
            address: parsed.to_string(),
            stabilization_interval: Duration::from_millis(100),
            timeout_budget: Duration::from_secs(5),
            scroll_limit: 0,
        })
    }

    /// Interval between document re-reads while waiting for content to settle
    pub fn stabilization_interval(mut self, interval: Duration) -> Self {
        self.stabilization_interval = interval;
        self
    }

    /// Total time the stabilization loop may spend waiting for a change
    /// before the last-seen document is returned as final.
    pub fn timeout_budget(mut self, budget: Duration) -> Self {
        self.timeout_budget = budget;
        self
    }

    /// Maximum number of observed content changes before returning.
    /// Zero means unbounded: the loop terminates only via stabilization.
    pub fn scroll_limit(mut self, limit: u32) -> Self {
        self.scroll_limit = limit;
        self
    }

    /// The validated target address
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn interval(&self) -> Duration {
        self.stabilization_interval
    }

    pub fn budget(&self) -> Duration {
        self.timeout_budget
    }

    pub fn limit(&self) -> u32 {
        self.scroll_limit
    }
}

/// Create a renderer with the default backend
///
/// Prefers the browser backend when the `browser` feature is enabled
/// (default); falls back to the static HTTP renderer otherwise.
#[cfg(feature = "browser")]
pub fn new_renderer(config: RenderConfig) -> impl Renderer {
    chrome::ChromeRenderer::new(config)
}

#[cfg(not(feature = "browser"))]
pub fn new_renderer(config: RenderConfig) -> impl Renderer {
    render::StaticRenderer::new(config)
}
