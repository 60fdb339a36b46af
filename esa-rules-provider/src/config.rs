//! Client configuration: region, credentials, endpoint and transport settings.

use std::fmt;
use std::time::Duration;

use crate::utils::log_sanitizer::mask_key;

/// Environment variable holding the access key id.
pub const ACCESS_KEY_ID_ENV: &str = "ALIBABA_CLOUD_ACCESS_KEY_ID";
/// Environment variable holding the access key secret.
pub const ACCESS_KEY_SECRET_ENV: &str = "ALIBABA_CLOUD_ACCESS_KEY_SECRET";

/// 阿里云 SDK 默认连接超时
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// 阿里云 SDK 默认读超时
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// AccessKey pair used to sign requests.
///
/// The format is never checked locally; a bad pair surfaces as
/// [`ProviderError::InvalidCredentials`](crate::ProviderError::InvalidCredentials) on
/// the first remote call.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub access_key_secret: String,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
        }
    }

    /// Explicit values first, then `lookup` on the two environment variable names.
    ///
    /// Empty explicit values count as absent. A value missing from both sources
    /// becomes an empty string.
    pub fn resolve<F>(explicit_id: Option<&str>, explicit_secret: Option<&str>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: Option<&str>, var: &str| {
            explicit
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .or_else(|| lookup(var))
                .unwrap_or_else(|| {
                    log::warn!("{var} is not set and no explicit value was given");
                    String::new()
                })
        };

        Self {
            access_key_id: pick(explicit_id, ACCESS_KEY_ID_ENV),
            access_key_secret: pick(explicit_secret, ACCESS_KEY_SECRET_ENV),
        }
    }

    /// [`resolve`](Self::resolve) against the process environment.
    pub fn from_env_or(explicit_id: Option<&str>, explicit_secret: Option<&str>) -> Self {
        Self::resolve(explicit_id, explicit_secret, |var| std::env::var(var).ok())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &mask_key(&self.access_key_id))
            .field("access_key_secret", &"***")
            .finish()
    }
}

/// Everything needed to build an [`EsaClient`](crate::EsaClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub region_id: String,
    pub credentials: Credentials,
    /// Overrides the endpoint derived from `region_id`.
    pub endpoint: Option<String>,
    /// Automatic retries of list calls on transient errors; updates are always sent once.
    pub max_retries: u32,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl ClientConfig {
    pub fn new(region_id: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            region_id: region_id.into(),
            credentials,
            endpoint: None,
            max_retries: 0,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.endpoint = endpoint.filter(|e| !e.is_empty());
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Host the requests go to: the override if set, else `esa.<region>.aliyuncs.com`.
    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("esa.{}.aliyuncs.com", self.region_id))
    }
}
