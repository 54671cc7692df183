//! Result and error types for Puppet.

use thiserror::Error;

/// Result type for Puppet operations
pub type PuppetResult<T> = Result<T, PuppetError>;

/// Errors that can occur in Puppet
#[derive(Debug, Error)]
pub enum PuppetError {
    /// Component has no type selector to compose from
    #[error("Puppet: typeSelector not specified for {component}")]
    MissingTypeSelector {
        /// Component type name
        component: String,
    },

    /// Expanded id selector is a compound selector
    #[error("Puppet: spaces are not allowed in idSelector: '{id_selector}' for {component}")]
    InvalidIdSelector {
        /// Id selector as configured (before expansion)
        id_selector: String,
        /// Component type name
        component: String,
    },

    /// Component was built without a page session
    #[error("Puppet: no page session attached to {component}")]
    Detached {
        /// Component type name
        component: String,
    },

    /// Waiting for a selector timed out
    #[error("Waiting for selector `{selector}` timed out after {ms}ms")]
    Timeout {
        /// Selector that never appeared
        selector: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Driver reported an error
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PuppetError {
    /// Whether this is one of the selector configuration errors
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingTypeSelector { .. } | Self::InvalidIdSelector { .. }
        )
    }
}
