//! PageDriver - the browser-automation collaborator behind components.
//!
//! Components compose selectors; a [`PageDriver`] resolves them against a live
//! page. Two operations are all a component needs:
//!
//! ```text
//! Component::locate()          ──► PageDriver::find_element(selector)
//! Component::await_presence()  ──► PageDriver::wait_for_selector(selector)
//! ```
//!
//! # Implementations
//!
//! - `ChromiumPage` - CDP via chromiumoxide (feature `browser`)
//! - [`MockDriver`] - in-memory, for unit testing page objects

use crate::result::{PuppetError, PuppetResult};
use crate::wait::WaitOptions;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Snapshot of an element found by a driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Selector the element was found with
    pub selector: String,
    /// Lowercase tag name
    pub tag_name: String,
    /// Element text content
    pub text_content: Option<String>,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(selector: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            tag_name: tag_name.into(),
            text_content: None,
        }
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }
}

/// Abstract driver trait for the page a component tree is bound to.
///
/// Timeouts and "not found" are the driver's business; components pass the
/// driver's errors through untouched.
#[async_trait]
pub trait PageDriver: Send + Sync + std::fmt::Debug {
    /// First element matching `selector`, if any
    async fn find_element(&self, selector: &str) -> PuppetResult<Option<ElementHandle>>;

    /// Suspend until an element matching `selector` is in the DOM
    async fn wait_for_selector(&self, selector: &str) -> PuppetResult<()>;
}

/// Mock driver for unit testing
#[derive(Debug, Default)]
pub struct MockDriver {
    elements: Vec<ElementHandle>,
    wait: WaitOptions,
    call_history: Mutex<Vec<String>>,
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mock element, matched by its exact selector
    pub fn add_element(&mut self, element: ElementHandle) {
        self.elements.push(element);
    }

    /// Builder form of [`MockDriver::add_element`]
    #[must_use]
    pub fn with_element(mut self, element: ElementHandle) -> Self {
        self.add_element(element);
        self
    }

    /// Set the wait options reported on timeout
    #[must_use]
    pub const fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.call_history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_default()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.history().iter().any(|c| c.starts_with(method))
    }

    fn record(&self, call: String) {
        if let Ok(mut history) = self.call_history.lock() {
            history.push(call);
        }
    }

    fn lookup(&self, selector: &str) -> Option<&ElementHandle> {
        self.elements.iter().find(|e| e.selector == selector)
    }
}

#[async_trait]
impl PageDriver for MockDriver {
    async fn find_element(&self, selector: &str) -> PuppetResult<Option<ElementHandle>> {
        self.record(format!("find_element:{selector}"));
        Ok(self.lookup(selector).cloned())
    }

    async fn wait_for_selector(&self, selector: &str) -> PuppetResult<()> {
        self.record(format!("wait_for_selector:{selector}"));
        self.lookup(selector)
            .map(|_| ())
            .ok_or_else(|| PuppetError::Timeout {
                selector: selector.to_string(),
                ms: self.wait.timeout_ms,
            })
    }
}
