//! 阿里云 ESA (边缘安全加速) OpenAPI 客户端

mod api;
mod error;
mod http;
mod sign;
mod types;

use std::fmt;

use reqwest::Client;

use crate::config::{ClientConfig, Credentials};
use crate::error::Result;
use crate::http_client::create_http_client;

pub(crate) use types::{ListRulesResponse, UpdateRuleResponseBody, serialize_to_query_string};

pub(crate) const ESA_API_VERSION: &str = "2024-09-10";
pub(crate) const ESA_PROVIDER_NAME: &str = "esa";
/// 空 body 的 SHA256 hash (固定值)
pub(crate) const EMPTY_BODY_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Alibaba Cloud ESA API client.
///
/// Authenticates via ACS3-HMAC-SHA256 signing with an AccessKey pair and talks to
/// `esa.<region>.aliyuncs.com` unless the config overrides the endpoint.
///
/// # Construction
///
/// ```rust,no_run
/// use esa_rules_provider::{ClientConfig, Credentials, EsaClient};
///
/// let config = ClientConfig::new(
///     "cn-hangzhou",
///     Credentials::new("your-access-key-id", "your-access-key-secret"),
/// );
/// let client = EsaClient::new(&config)?;
/// # Ok::<(), esa_rules_provider::ProviderError>(())
/// ```
pub struct EsaClient {
    pub(crate) client: Client,
    pub(crate) endpoint: String,
    pub(crate) credentials: Credentials,
    pub(crate) max_retries: u32,
}

impl EsaClient {
    /// Build a client bound to `config.endpoint()`. No remote call is made here.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let endpoint = config.endpoint();
        log::debug!(
            "[{ESA_PROVIDER_NAME}] client for region {} at {endpoint}",
            config.region_id
        );
        Ok(Self {
            client: create_http_client(config, ESA_PROVIDER_NAME)?,
            endpoint,
            credentials: config.credentials.clone(),
            max_retries: config.max_retries,
        })
    }

    /// Host every request is sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl fmt::Debug for EsaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EsaClient")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}
