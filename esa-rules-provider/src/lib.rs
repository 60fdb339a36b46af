//! # esa-rules-provider
//!
//! A small client for the Alibaba Cloud ESA (Edge Security Acceleration) OpenAPI,
//! covering the origin-rule and redirect-rule operations.
//!
//! | Operation | Action | Method |
//! |-----------|--------|--------|
//! | [`EsaApi::list_origin_rules`] | `ListOriginRules` | GET |
//! | [`EsaApi::update_origin_rule`] | `UpdateOriginRule` | POST |
//! | [`EsaApi::list_redirect_rules`] | `ListRedirectRules` | GET |
//! | [`EsaApi::update_redirect_rule`] | `UpdateRedirectRule` | POST |
//!
//! Requests are signed with ACS3-HMAC-SHA256 (API version `2024-09-10`).
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)*: use rustls.
//! - **`native-tls`**: use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use esa_rules_provider::{ClientConfig, Credentials, EsaApi, EsaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::from_env_or(None, None);
//!     let client = EsaClient::new(&ClientConfig::new("cn-hangzhou", credentials))?;
//!
//!     let rules = client.list_origin_rules(123_456).await?;
//!     for rule in &rules.configs {
//!         println!("{} {:?} {:?}", rule.config_id, rule.rule_name, rule.origin_scheme);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). API error codes
//! are mapped onto structured variants such as
//! [`ProviderError::InvalidCredentials`] or [`ProviderError::InvalidParameter`];
//! unmapped codes end up in [`ProviderError::Unknown`] with the raw code kept.
//!
//! Only the first page of each listing is requested. A warning is logged when the
//! service reports more rules than were returned.

mod config;
mod error;
mod esa;
mod http_client;
mod traits;
mod types;
mod utils;

pub use config::{ACCESS_KEY_ID_ENV, ACCESS_KEY_SECRET_ENV, ClientConfig, Credentials};
pub use error::{ProviderError, Result};
pub use esa::EsaClient;
pub use traits::EsaApi;
pub use types::{
    NamedRule, OriginRule, OriginScheme, RedirectRule, RuleList, UpdateOriginRuleRequest,
    UpdateRedirectRuleRequest, UpdateRuleResponse,
};
