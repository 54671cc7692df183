//! Puppet: Page Object Model helpers for browser-driven UI tests
//!
//! Describe the page under test as a tree of components. Each component knows
//! its own selector fragments and composes the full CSS selector that reaches
//! it, walking up through its ancestors. A page driver resolves the composed
//! selector against a live page.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    PUPPET Architecture                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────────┐     │
//! │   │ Shorthand  │    │ Component  │    │ PageDriver     │     │
//! │   │ {token} →  │───►│ selector() │───►│ find_element   │     │
//! │   │ [data-test]│    │ tree       │    │ wait_for_sel.  │     │
//! │   └────────────┘    └────────────┘    └────────────────┘     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Shorthand
//!
//! `{save}` in a type, ascendant or descendant fragment becomes
//! `[data-test='save']`; in an id fragment it becomes `[data-test-id='save']`.

#![warn(missing_docs)]

#[cfg(feature = "browser")]
mod browser;
mod driver;
mod page_object;
mod result;
mod shorthand;

/// Log output for test runs
pub mod tracing_support;

/// Wait options for drivers
pub mod wait;

#[cfg(feature = "browser")]
pub use browser::ChromiumPage;
pub use driver::{ElementHandle, MockDriver, PageDriver};
pub use page_object::{Component, ComponentBase, ComponentConfig, Session, SimpleComponent};
pub use result::{PuppetError, PuppetResult};
pub use shorthand::{expand, expand_flag, ShorthandKind, TEST_ATTRIBUTE, TEST_ID_ATTRIBUTE};
pub use wait::WaitOptions;

/// Prelude for convenient imports
pub mod prelude {
    #[cfg(feature = "browser")]
    pub use super::browser::*;
    pub use super::driver::*;
    pub use super::page_object::*;
    pub use super::result::*;
    pub use super::shorthand::*;
    pub use super::tracing_support::init_tracing;
    pub use super::wait::*;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod reexport_tests {
        use super::*;

        #[test]
        fn test_expand_reexport() {
            assert_eq!(expand("{x}", ShorthandKind::Test), "[data-test='x']");
            assert_eq!(expand_flag("{x}", true), "[data-test-id='x']");
            assert_eq!(TEST_ATTRIBUTE, "data-test");
            assert_eq!(TEST_ID_ATTRIBUTE, "data-test-id");
        }

        #[test]
        fn test_prelude_covers_page_objects() {
            use crate::prelude::*;

            let form = SimpleComponent::new("form{login}", ComponentConfig::new());
            let submit = SimpleComponent::new(
                "button",
                ComponentConfig::new()
                    .with_parent(&form)
                    .with_id_selector("{submit}"),
            );
            assert_eq!(
                submit.selector().unwrap(),
                "form[data-test='login'] button [data-test-id='submit']"
            );
        }
    }
}
