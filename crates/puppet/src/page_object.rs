//! Page Object Model components.
//!
//! A [`Component`] describes one region of the page under test. Components
//! form a tree through borrowed parent references, and each one can compose
//! the full CSS selector that reaches it from the document root:
//!
//! ```text
//! parent.selector()  ascendant  type  id  descendant
//! "ul[data-test='todos']"  ".done"  "li"  "[data-test-id='7']"  "span"
//! ```
//!
//! Every fragment goes through the `{token}` shorthand (see [`crate::shorthand`]).
//!
//! # Example
//!
//! ```
//! use puppet::prelude::*;
//!
//! #[derive(Debug)]
//! struct TodoList<'p> {
//!     base: ComponentBase<'p>,
//! }
//!
//! impl Component for TodoList<'_> {
//!     fn type_selector(&self) -> &str {
//!         "ul{todos}"
//!     }
//!
//!     fn base(&self) -> &ComponentBase<'_> {
//!         &self.base
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct TodoItem<'p> {
//!     base: ComponentBase<'p>,
//! }
//!
//! impl Component for TodoItem<'_> {
//!     fn type_selector(&self) -> &str {
//!         "li"
//!     }
//!
//!     fn base(&self) -> &ComponentBase<'_> {
//!         &self.base
//!     }
//! }
//!
//! let list = TodoList { base: ComponentBase::new(ComponentConfig::new()) };
//! let item = TodoItem {
//!     base: ComponentBase::new(ComponentConfig::new().with_parent(&list).with_id_selector("{7}")),
//! };
//!
//! assert_eq!(
//!     item.selector().unwrap(),
//!     "ul[data-test='todos'] li [data-test-id='7']"
//! );
//! ```

use crate::driver::{ElementHandle, PageDriver};
use crate::result::{PuppetError, PuppetResult};
use crate::shorthand::{expand, ShorthandKind};
use async_trait::async_trait;
use std::borrow::Cow;
use std::sync::Arc;

/// Shared handle to the page a component tree is bound to.
///
/// Cloning shares the same driver; children never get a page of their own.
#[derive(Debug, Clone)]
pub struct Session {
    page: Arc<dyn PageDriver>,
}

impl Session {
    /// Wrap a driver
    #[must_use]
    pub fn new(page: impl PageDriver + 'static) -> Self {
        Self {
            page: Arc::new(page),
        }
    }

    /// Wrap an already shared driver
    #[must_use]
    pub fn from_arc(page: Arc<dyn PageDriver>) -> Self {
        Self { page }
    }

    /// The page driver
    #[must_use]
    pub fn page(&self) -> &dyn PageDriver {
        self.page.as_ref()
    }

    /// Whether both sessions drive the same page
    #[must_use]
    pub fn same_page(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.page, &other.page)
    }
}

/// Construction options for a component
#[derive(Default)]
pub struct ComponentConfig<'p> {
    parent: Option<&'p dyn Component>,
    context: Option<&'p dyn Component>,
    session: Option<Session>,
    id_selector: Option<String>,
    ascendant_selector: Option<String>,
}

impl<'p> ComponentConfig<'p> {
    /// Create an empty config (root component, no session)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Nest under an enclosing component
    #[must_use]
    pub fn with_parent(mut self, parent: &'p dyn Component) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Inherit the session from a donor component without nesting under it
    #[must_use]
    pub fn with_context(mut self, context: &'p dyn Component) -> Self {
        self.context = Some(context);
        self
    }

    /// Bind to a page session directly
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Set the instance-discriminating selector
    #[must_use]
    pub fn with_id_selector(mut self, id_selector: impl Into<String>) -> Self {
        self.id_selector = Some(id_selector.into());
        self
    }

    /// Set an extra ancestor selector between the parent and this component
    #[must_use]
    pub fn with_ascendant_selector(mut self, ascendant_selector: impl Into<String>) -> Self {
        self.ascendant_selector = Some(ascendant_selector.into());
        self
    }
}

impl std::fmt::Debug for ComponentConfig<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentConfig")
            .field("parent", &self.parent.map(|p| p.component_name()))
            .field("context", &self.context.map(|c| c.component_name()))
            .field("session", &self.session)
            .field("id_selector", &self.id_selector)
            .field("ascendant_selector", &self.ascendant_selector)
            .finish()
    }
}

/// State shared by every component: tree position, session and selectors.
///
/// Immutable once built.
pub struct ComponentBase<'p> {
    parent: Option<&'p dyn Component>,
    session: Option<Session>,
    id_selector: Option<String>,
    ascendant_selector: Option<String>,
}

impl<'p> ComponentBase<'p> {
    /// Build from a config.
    ///
    /// The session comes from the context donor first, then the config, then
    /// the parent.
    #[must_use]
    pub fn new(config: ComponentConfig<'p>) -> Self {
        let ComponentConfig {
            parent,
            context,
            session,
            id_selector,
            ascendant_selector,
        } = config;

        let session = context
            .and_then(|c| c.session().cloned())
            .or(session)
            .or_else(|| parent.and_then(|p| p.session().cloned()));

        Self {
            parent,
            session,
            id_selector: id_selector.filter(|s| !s.is_empty()),
            ascendant_selector: ascendant_selector.filter(|s| !s.is_empty()),
        }
    }

    /// Enclosing component
    #[must_use]
    pub fn parent(&self) -> Option<&'p dyn Component> {
        self.parent
    }

    /// Page session, if any was supplied or inherited
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Raw id selector
    #[must_use]
    pub fn id_selector(&self) -> Option<&str> {
        self.id_selector.as_deref()
    }

    /// Raw ascendant selector
    #[must_use]
    pub fn ascendant_selector(&self) -> Option<&str> {
        self.ascendant_selector.as_deref()
    }
}

impl std::fmt::Debug for ComponentBase<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentBase")
            .field("parent", &self.parent.map(|p| p.component_name()))
            .field("session", &self.session)
            .field("id_selector", &self.id_selector)
            .field("ascendant_selector", &self.ascendant_selector)
            .finish()
    }
}

/// A UI component bound to a region of the page.
///
/// Implementors supply the type selector and their [`ComponentBase`]; selector
/// composition and the driver pass-throughs are provided.
#[async_trait]
pub trait Component: Send + Sync {
    /// Base selector fragment for this kind of component (tag, class, `{token}`)
    fn type_selector(&self) -> &str;

    /// Shared component state
    fn base(&self) -> &ComponentBase<'_>;

    /// Name used in error messages
    fn component_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Enclosing component
    fn parent(&self) -> Option<&dyn Component> {
        self.base().parent()
    }

    /// Page session
    fn session(&self) -> Option<&Session> {
        self.base().session()
    }

    /// Selector reaching this component
    fn selector(&self) -> PuppetResult<String> {
        self.selector_for(None)
    }

    /// Selector reaching `descendant` inside this component
    fn descendant_selector(&self, descendant: &str) -> PuppetResult<String> {
        self.selector_for(Some(descendant))
    }

    /// Compose the selector for this component, optionally narrowed to a descendant.
    ///
    /// # Errors
    ///
    /// - [`PuppetError::MissingTypeSelector`] if the type selector is empty
    /// - [`PuppetError::InvalidIdSelector`] if the expanded id selector holds a space
    /// - any error raised while composing an ancestor's selector
    fn selector_for(&self, descendant: Option<&str>) -> PuppetResult<String> {
        let base = self.base();
        let mut parts: Vec<Cow<'_, str>> = Vec::with_capacity(5);

        if let Some(parent) = base.parent() {
            parts.push(parent.selector()?.into());
        }
        if let Some(ascendant) = base.ascendant_selector() {
            parts.push(expand(ascendant, ShorthandKind::Test));
        }

        let type_selector = self.type_selector();
        if type_selector.is_empty() {
            return Err(PuppetError::MissingTypeSelector {
                component: self.component_name().to_string(),
            });
        }
        parts.push(expand(type_selector, ShorthandKind::Test));

        if let Some(raw) = base.id_selector() {
            let id = expand(raw, ShorthandKind::TestId);
            if id.trim().contains(' ') {
                return Err(PuppetError::InvalidIdSelector {
                    id_selector: raw.to_string(),
                    component: self.component_name().to_string(),
                });
            }
            parts.push(id);
        }
        if let Some(descendant) = descendant.filter(|d| !d.is_empty()) {
            let descendant = format!(" {descendant}");
            parts.push(expand(&descendant, ShorthandKind::Test).into_owned().into());
        }

        let selector = collapse_spaces(&parts.join(" "));
        tracing::trace!(component = self.component_name(), %selector, "composed selector");
        Ok(selector)
    }

    /// Find the first element matching [`Component::selector`].
    ///
    /// # Errors
    ///
    /// Selector composition errors, [`PuppetError::Detached`] without a session,
    /// or whatever the driver reports.
    async fn locate(&self) -> PuppetResult<Option<ElementHandle>> {
        let selector = self.selector()?;
        let session = attached(self)?;
        tracing::debug!(component = self.component_name(), %selector, "locating element");
        session.page().find_element(&selector).await
    }

    /// Wait until an element matching [`Component::selector`] is in the DOM.
    ///
    /// # Errors
    ///
    /// Selector composition errors, [`PuppetError::Detached`] without a session,
    /// or the driver's timeout.
    async fn await_presence(&self) -> PuppetResult<()> {
        let selector = self.selector()?;
        let session = attached(self)?;
        tracing::debug!(component = self.component_name(), %selector, "waiting for element");
        session.page().wait_for_selector(&selector).await
    }
}

fn attached<C: Component + ?Sized>(component: &C) -> PuppetResult<&Session> {
    component.session().ok_or_else(|| PuppetError::Detached {
        component: component.component_name().to_string(),
    })
}

/// Fold runs of spaces into one and trim the ends.
fn collapse_spaces(selector: &str) -> String {
    selector
        .split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Component whose type selector is chosen at runtime.
#[derive(Debug)]
pub struct SimpleComponent<'p> {
    type_selector: String,
    base: ComponentBase<'p>,
}

impl<'p> SimpleComponent<'p> {
    /// Create a component with the given type selector
    #[must_use]
    pub fn new(type_selector: impl Into<String>, config: ComponentConfig<'p>) -> Self {
        Self {
            type_selector: type_selector.into(),
            base: ComponentBase::new(config),
        }
    }
}

impl Component for SimpleComponent<'_> {
    fn type_selector(&self) -> &str {
        &self.type_selector
    }

    fn base(&self) -> &ComponentBase<'_> {
        &self.base
    }

    fn component_name(&self) -> &str {
        "SimpleComponent"
    }
}
