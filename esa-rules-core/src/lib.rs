//! ESA rules core library
//!
//! Business logic between the command line and the ESA API client:
//! - rule resolution by config id or name (`resolver`)
//! - redirect target port rewriting (`rewrite`)
//! - list / update flows (`services::RuleService`)
//!
//! The remote side is reached only through the [`EsaApi`](esa_rules_provider::EsaApi)
//! trait, so everything here runs against in-memory fakes in tests.

pub mod error;
pub mod resolver;
pub mod rewrite;
pub mod services;

#[cfg(test)]
mod test_utils;

pub use error::{CoreError, CoreResult, RuleKind};
pub use resolver::RuleSelector;
pub use rewrite::rewrite_redirect_port;
pub use services::{OriginChange, OriginUpdate, RedirectPortChange, RuleListing, RuleService};
