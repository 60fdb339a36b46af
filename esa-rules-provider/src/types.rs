//! Rule records and request/response types shared by the client and its callers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============ Origin rules ============

/// Protocol used when the edge forwards a request to the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginScheme {
    Http,
    Https,
    /// Use the same protocol as the client request.
    Follow,
}

impl OriginScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::Follow => "follow",
        }
    }
}

impl fmt::Display for OriginScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OriginScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            "follow" => Ok(Self::Follow),
            other => Err(format!(
                "unsupported origin scheme '{other}' (expected http, https or follow)"
            )),
        }
    }
}

/// Origin rule record as returned by `ListOriginRules`.
///
/// Every field but `config_id` may be absent on the wire. Ports travel as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OriginRule {
    #[serde(default)]
    pub config_id: i64,
    pub rule_name: Option<String>,
    /// Kept as a raw string: the service may return values this tool does not know.
    pub origin_scheme: Option<String>,
    pub origin_http_port: Option<String>,
    pub origin_https_port: Option<String>,
    pub config_type: Option<String>,
    /// Match expression.
    pub rule: Option<String>,
    /// `on` / `off`.
    pub rule_enable: Option<String>,
    pub origin_host: Option<String>,
    pub origin_sni: Option<String>,
    pub sequence: Option<i32>,
}

// ============ Redirect rules ============

/// Redirect rule record as returned by `ListRedirectRules`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RedirectRule {
    #[serde(default)]
    pub config_id: i64,
    pub rule_name: Option<String>,
    /// `static` or `dynamic`; dynamic targets are template expressions.
    #[serde(rename = "Type")]
    pub redirect_type: Option<String>,
    pub target_url: Option<String>,
    pub status_code: Option<String>,
    pub reserve_query_string: Option<String>,
    pub config_type: Option<String>,
    pub rule: Option<String>,
    pub rule_enable: Option<String>,
    pub sequence: Option<i32>,
}

// ============ Shared ============

/// Anything with a remote config id and an optional display name.
pub trait NamedRule {
    fn config_id(&self) -> i64;
    fn rule_name(&self) -> Option<&str>;
}

impl NamedRule for OriginRule {
    fn config_id(&self) -> i64 {
        self.config_id
    }

    fn rule_name(&self) -> Option<&str> {
        self.rule_name.as_deref()
    }
}

impl NamedRule for RedirectRule {
    fn config_id(&self) -> i64 {
        self.config_id
    }

    fn rule_name(&self) -> Option<&str> {
        self.rule_name.as_deref()
    }
}

/// One page of a rule listing.
///
/// Only the first page is ever requested, so `configs` may hold fewer rules than
/// `total_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleList<T> {
    pub request_id: Option<String>,
    pub configs: Vec<T>,
    pub total_count: Option<u32>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub total_page: Option<u32>,
}

impl<T> RuleList<T> {
    pub fn new(configs: Vec<T>) -> Self {
        Self {
            request_id: None,
            total_count: u32::try_from(configs.len()).ok(),
            configs,
            page_number: Some(1),
            page_size: None,
            total_page: Some(1),
        }
    }

    /// Whether the service reports more rules than this page carries.
    pub fn is_truncated(&self) -> bool {
        self.total_count
            .is_some_and(|total| usize::try_from(total).is_ok_and(|t| t > self.configs.len()))
    }
}

/// Parameters of `UpdateOriginRule`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOriginRuleRequest {
    pub site_id: i64,
    pub config_id: i64,
    pub origin_scheme: OriginScheme,
    /// `None` leaves the port unchanged on the remote side.
    pub origin_http_port: Option<u32>,
    pub origin_https_port: Option<u32>,
}

/// Parameters of `UpdateRedirectRule`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRedirectRuleRequest {
    pub site_id: i64,
    pub config_id: i64,
    pub target_url: String,
}

/// Result of an update call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRuleResponse {
    pub request_id: String,
}
