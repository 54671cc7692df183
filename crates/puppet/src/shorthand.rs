//! Test-attribute shorthand for CSS selectors.
//!
//! Selector fragments may contain `{token}` groups which expand to attribute
//! selectors on the test attributes:
//!
//! - type/ascendant/descendant context: `{row}` → `[data-test='row']`
//! - id context: `{row}` → `[data-test-id='row']`
//!
//! A token runs up to the first `}`; nested braces are not supported.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Attribute used for type shorthand
pub const TEST_ATTRIBUTE: &str = "data-test";

/// Attribute used for id shorthand
pub const TEST_ID_ATTRIBUTE: &str = "data-test-id";

/// Which test attribute a `{token}` group expands to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShorthandKind {
    /// `[data-test='token']`
    #[default]
    Test,
    /// `[data-test-id='token']`
    TestId,
}

impl ShorthandKind {
    /// Map the `isIdSelector` flag onto a kind
    #[must_use]
    pub const fn from_id_flag(is_id_selector: bool) -> Self {
        if is_id_selector {
            Self::TestId
        } else {
            Self::Test
        }
    }

    /// The HTML attribute this kind targets
    #[must_use]
    pub const fn attribute(&self) -> &'static str {
        match self {
            Self::Test => TEST_ATTRIBUTE,
            Self::TestId => TEST_ID_ATTRIBUTE,
        }
    }

    fn replacement(self) -> &'static str {
        match self {
            Self::Test => "[data-test='${1}']",
            Self::TestId => "[data-test-id='${1}']",
        }
    }
}

impl std::fmt::Display for ShorthandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.attribute())
    }
}

fn shortcut_syntax() -> &'static Regex {
    static SHORTCUT_SYNTAX: OnceLock<Regex> = OnceLock::new();
    SHORTCUT_SYNTAX.get_or_init(|| Regex::new(r"\{([^}]+)\}").expect("shorthand pattern compiles"))
}

/// Expand every `{token}` group in `selector`.
///
/// Text outside of groups passes through unchanged, and the input is borrowed
/// back when it contains no group at all.
///
/// ```
/// use puppet::{expand, ShorthandKind};
///
/// assert_eq!(expand("{save}", ShorthandKind::Test), "[data-test='save']");
/// assert_eq!(expand("li{row}", ShorthandKind::TestId), "li[data-test-id='row']");
/// ```
#[must_use]
pub fn expand(selector: &str, kind: ShorthandKind) -> Cow<'_, str> {
    shortcut_syntax().replace_all(selector, kind.replacement())
}

/// [`expand`] with the boolean id flag.
#[must_use]
pub fn expand_flag(selector: &str, is_id_selector: bool) -> Cow<'_, str> {
    expand(selector, ShorthandKind::from_id_flag(is_id_selector))
}
