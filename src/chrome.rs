//! Headless Chrome render backend
//!
//! One render call owns one browser session: the session is launched after
//! the reachability check passes and is torn down before the call returns,
//! on the success and failure paths alike. The scroll loop dispatches an
//! End-key gesture, re-reads the serialized page, and treats "no change for
//! the whole budget" as completion rather than failure (timeout-is-success).

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::browser::tab::Tab;
use headless_chrome::{Browser, LaunchOptions};
use log::{debug, info, warn};

use crate::document::RenderedDocument;
use crate::render::{http_client, probe, Renderer};
use crate::{Error, RenderConfig, RenderRequest, Result};

/// Renderer backed by a headless Chrome session per call
///
/// Sessions are never pooled or shared; each render launches, scrolls, and
/// quits its own browser. `sessions_started` counts launches so callers can
/// observe that failed pre-checks start no session.
pub struct ChromeRenderer {
    config: RenderConfig,
    sessions_started: AtomicU32,
}

impl ChromeRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            sessions_started: AtomicU32::new(0),
        }
    }

    /// Number of browser sessions this renderer has launched
    pub fn sessions_started(&self) -> u32 {
        self.sessions_started.load(Ordering::SeqCst)
    }

    fn launch(&self) -> Result<(Browser, Arc<Tab>)> {
        // Sandbox off and /dev/shm avoided: headless Chrome under containers
        // crashes without both.
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .window_size(Some((self.config.viewport.width, self.config.viewport.height)))
            .args(vec![std::ffi::OsStr::new("--disable-dev-shm-usage")])
            .build()
            .map_err(|e| {
                Error::InitializationError(format!("Failed to build launch options: {}", e))
            })?;

        let browser = Browser::new(launch_options)
            .map_err(|e| Error::InitializationError(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::InitializationError(format!("Failed to create tab: {}", e)))?;

        tab.set_user_agent(&self.config.user_agent, None, None)
            .map_err(|e| Error::InitializationError(format!("Failed to set user agent: {}", e)))?;

        self.sessions_started.fetch_add(1, Ordering::SeqCst);
        Ok((browser, tab))
    }
}

impl Renderer for ChromeRenderer {
    /// Render the address to its fully scrolled document.
    ///
    /// A page that never changes after navigation waits out the whole
    /// stabilization budget and is then returned as-is; there is no way to
    /// distinguish "finished" from "never started" at this layer.
    fn render(&self, request: &RenderRequest) -> Result<RenderedDocument> {
        // Existence check first; an error-range status means no session is
        // ever created.
        let client = http_client(&self.config)?;
        probe(&client, request.address())?;

        let (browser, tab) = self.launch()?;
        info!("Session started for {}", request.address());

        tab.set_default_timeout(Duration::from_millis(self.config.nav_timeout_ms));

        tab.navigate_to(request.address())
            .map_err(|e| Error::LoadError(format!("Navigation failed: {}", e)))?;

        // A navigation timeout is not fatal: scroll whatever partial content
        // made it in. Latent gap inherited from the source behavior.
        if let Err(e) = tab.wait_until_navigated() {
            warn!(
                "Navigation to {} did not settle in {}ms, continuing with partial content: {}",
                request.address(),
                self.config.nav_timeout_ms,
                e
            );
        }

        let html = scroll_to_stable(&tab, request)?;

        // Dropping the browser tears the child process down; do it before
        // parsing so the session never outlives the render work.
        drop(tab);
        drop(browser);
        info!("Session closed for {}", request.address());

        Ok(RenderedDocument::from_html(&html, request.address()))
    }
}

/// Scroll until the serialized page stops changing or a limit is reached.
///
/// Stabilization: the wait clock accrues only while consecutive re-reads are
/// identical and resets on every observed change. `scroll_limit` counts
/// observed changes, not dispatched gestures; zero means unbounded.
fn scroll_to_stable(tab: &Tab, request: &RenderRequest) -> Result<String> {
    let mut previous = page_source(tab)?;
    let mut waited = Duration::ZERO;
    let mut scrolls = 0u32;

    'scroll: while waited < request.budget() {
        tab.press_key("End")
            .map_err(|e| Error::RenderError(format!("Scroll gesture failed: {}", e)))?;

        while waited < request.budget() {
            let current = page_source(tab)?;

            if current == previous {
                waited += request.interval();
                std::thread::sleep(request.interval());
                continue;
            }

            scrolls += 1;
            debug!("Content changed after scroll {} ({} bytes)", scrolls, current.len());

            if request.limit() > 0 && scrolls >= request.limit() {
                return Ok(current);
            }

            waited = Duration::ZERO;
            previous = current;
            continue 'scroll;
        }
    }

    // Budget exhausted with no change: best-effort content, not a failure.
    debug!("Page stabilized after {} scroll(s)", scrolls);
    Ok(previous)
}

fn page_source(tab: &Tab) -> Result<String> {
    Ok(tab.get_content()?)
}
