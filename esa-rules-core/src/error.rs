//! Unified error type definition

use std::fmt;

use thiserror::Error;

// Re-export library error type
pub use esa_rules_provider::ProviderError;

/// Which rule listing an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Origin,
    Redirect,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Origin => "origin",
            Self::Redirect => "redirect",
        })
    }
}

fn join_names(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

/// Core layer error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// An explicit config id is absent from the site's listing.
    #[error("No {kind} rule with config id {config_id}")]
    RuleIdNotFound { kind: RuleKind, config_id: i64 },

    /// No rule name matched; `available` lists the named rules in listing order.
    #[error("No {kind} rule named '{name}'. Available: {}", join_names(.available))]
    RuleNameNotFound {
        kind: RuleKind,
        name: String,
        available: Vec<String>,
    },

    /// The site has no rules of this kind.
    #[error("Site has no {kind} rules")]
    NoRules { kind: RuleKind },

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.), used for log classification.
    ///
    /// **Please update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::RuleIdNotFound { .. } | Self::RuleNameNotFound { .. } | Self::NoRules { .. } => {
                true
            }
            Self::Provider(e) => e.is_expected(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
