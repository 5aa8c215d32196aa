//! The renderer seam and the static (no-JS, no-scroll) backend
//!
//! Every backend implements [`Renderer`]: validate cheaply, fetch, and hand
//! back an owned [`RenderedDocument`]. The static backend is a plain HTTP
//! fetch for pages that need no scrolling; the browser backend lives in
//! [`crate::chrome`].

use log::{debug, info};
use reqwest::blocking::Client;
use std::time::Duration;

use crate::document::RenderedDocument;
use crate::{Error, RenderConfig, RenderRequest, Result};

/// Core trait for render backends
pub trait Renderer {
    /// Drive the address to a final document.
    ///
    /// Fails with [`Error::NotReachable`] when the target answers the
    /// reachability check with an error-range status; backends start no
    /// session in that case.
    fn render(&self, request: &RenderRequest) -> Result<RenderedDocument>;
}

/// Build the blocking HTTP client shared by both backends' pre-checks
pub(crate) fn http_client(config: &RenderConfig) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_millis(config.nav_timeout_ms))
        .build()
        .map_err(|e| Error::InitializationError(format!("Failed to build HTTP client: {}", e)))
}

/// Lightweight existence check: a plain GET whose status decides whether a
/// render is attempted at all. Statuses of 300 and above fail with
/// `NotReachable`.
pub(crate) fn probe(client: &Client, url: &str) -> Result<reqwest::blocking::Response> {
    let res = client
        .get(url)
        .send()
        .map_err(|e| Error::LoadError(format!("Reachability check failed: {}", e)))?;

    let status = res.status().as_u16();
    debug!("Reachability check for {}: {}", url, status);

    if status >= 300 {
        return Err(Error::NotReachable {
            url: url.to_string(),
            status,
        });
    }
    Ok(res)
}

/// A renderer that fetches the page once over HTTP and parses it as-is.
///
/// No JavaScript runs and no scrolling happens, so the stabilization fields
/// of the request are ignored. Suitable for server-rendered pages.
pub struct StaticRenderer {
    config: RenderConfig,
}

impl StaticRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Renderer for StaticRenderer {
    fn render(&self, request: &RenderRequest) -> Result<RenderedDocument> {
        let client = http_client(&self.config)?;

        // One request doubles as the reachability check and the fetch.
        let res = probe(&client, request.address())?;
        let body = res
            .text()
            .map_err(|e| Error::LoadError(format!("Failed to read response body: {}", e)))?;

        info!("Fetched {} ({} bytes)", request.address(), body.len());
        Ok(RenderedDocument::from_html(&body, request.address()))
    }
}
