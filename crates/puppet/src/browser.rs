//! Chromium page driver.
//!
//! Adapts an already-open chromiumoxide page to [`PageDriver`] so component
//! trees can run against a real browser. Launching and closing the browser is
//! left to the caller.
//!
//! Element lookups run `document.querySelector` in the page through CDP and
//! return a small JSON probe; waiting polls that probe until it finds a match
//! or the [`WaitOptions`] timeout runs out.

use crate::driver::{ElementHandle, PageDriver};
use crate::result::{PuppetError, PuppetResult};
use crate::wait::WaitOptions;
use async_trait::async_trait;
use chromiumoxide::page::Page as CdpPage;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Result of the in-page lookup script
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ElementProbe {
    found: bool,
    tag_name: Option<String>,
    text_content: Option<String>,
}

impl ElementProbe {
    fn into_handle(self, selector: &str) -> Option<ElementHandle> {
        if !self.found {
            return None;
        }
        Some(ElementHandle {
            selector: selector.to_string(),
            tag_name: self.tag_name.unwrap_or_default(),
            text_content: self.text_content,
        })
    }
}

/// Build the lookup script for `selector`.
///
/// The selector is embedded as a JSON string literal, which is also a valid
/// JavaScript string literal.
fn probe_script(selector: &str) -> PuppetResult<String> {
    let literal = serde_json::to_string(selector)?;
    Ok(format!(
        r#"(() => {{
            const el = document.querySelector({literal});
            if (!el) {{
                return {{ found: false }};
            }}
            return {{
                found: true,
                tag_name: el.tagName.toLowerCase(),
                text_content: el.textContent,
            }};
        }})()"#
    ))
}

/// A [`PageDriver`] backed by a CDP page
#[derive(Debug, Clone)]
pub struct ChromiumPage {
    inner: Arc<Mutex<CdpPage>>,
    wait: WaitOptions,
}

impl ChromiumPage {
    /// Wrap a chromiumoxide page with default wait options
    #[must_use]
    pub fn new(page: CdpPage) -> Self {
        Self {
            inner: Arc::new(Mutex::new(page)),
            wait: WaitOptions::default(),
        }
    }

    /// Override the wait options
    #[must_use]
    pub const fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Current wait options
    #[must_use]
    pub const fn wait_options(&self) -> &WaitOptions {
        &self.wait
    }

    async fn probe(&self, selector: &str) -> PuppetResult<Option<ElementHandle>> {
        let script = probe_script(selector)?;
        let page = self.inner.lock().await;
        let probe: ElementProbe = page
            .evaluate(script)
            .await
            .map_err(|e| PuppetError::Driver {
                message: e.to_string(),
            })?
            .into_value()?;
        Ok(probe.into_handle(selector))
    }
}

#[async_trait]
impl PageDriver for ChromiumPage {
    async fn find_element(&self, selector: &str) -> PuppetResult<Option<ElementHandle>> {
        self.probe(selector).await
    }

    async fn wait_for_selector(&self, selector: &str) -> PuppetResult<()> {
        let deadline = Instant::now() + self.wait.timeout();
        loop {
            if self.probe(selector).await?.is_some() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                tracing::warn!(%selector, timeout_ms = self.wait.timeout_ms, "selector never appeared");
                return Err(PuppetError::Timeout {
                    selector: selector.to_string(),
                    ms: self.wait.timeout_ms,
                });
            }
            tokio::time::sleep(self.wait.poll_interval()).await;
        }
    }
}
