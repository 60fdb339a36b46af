//! HTTP transport helpers
//!
//! Sends an already-signed `RequestBuilder`, classifies transport failures into
//! [`ProviderError`] variants and optionally retries transient ones. Signing stays with
//! the caller: the builder handed in here is final.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ProviderError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// Build the shared `reqwest` client with the configured timeouts.
pub fn create_http_client(config: &ClientConfig, provider_name: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.read_timeout)
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// What is being sent, for log lines and error details.
#[derive(Debug, Clone, Copy)]
pub struct RequestLabel<'a> {
    pub provider: &'a str,
    pub method: &'a str,
    pub action: &'a str,
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Send the request once and return `(status, body)`.
    ///
    /// HTTP 429 becomes [`ProviderError::RateLimited`], 502..=504 become
    /// [`ProviderError::NetworkError`]. Every other status is returned to the caller,
    /// which knows how the API encodes business errors.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        label: RequestLabel<'_>,
    ) -> Result<(u16, String)> {
        let RequestLabel {
            provider,
            method,
            action,
        } = label;
        log::debug!("[{provider}] {method} {action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[{provider}] {action} -> HTTP {status}");

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider}] Gateway error (HTTP {status})");
            return Err(ProviderError::NetworkError {
                provider: provider.to_string(),
                detail: format!("HTTP {status}: {}", truncate_for_log(&body)),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("[{provider}] Response Body: {}", truncate_for_log(&body));

        Ok((status, body))
    }

    /// Same as [`execute_request`](Self::execute_request), retrying transient errors up
    /// to `max_retries` times with exponential backoff. `max_retries == 0` sends once.
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        label: RequestLabel<'_>,
        max_retries: u32,
    ) -> Result<(u16, String)> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, label).await;
        }

        let mut attempt = 0;
        loop {
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{}] Cannot clone request, disabling retry", label.provider);
                return Self::execute_request(request_builder, label).await;
            };

            match Self::execute_request(req, label).await {
                Err(e) if attempt < max_retries && is_retryable(&e) => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] {} failed (attempt {}/{}), retrying in {:.1}s: {e}",
                        label.provider,
                        label.action,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Parse a JSON body, logging the raw text on failure.
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

fn is_retryable(error: &ProviderError) -> bool {
    matches!(
        error,
        ProviderError::NetworkError { .. }
            | ProviderError::Timeout { .. }
            | ProviderError::RateLimited { .. }
    )
}

/// `Retry-After` wins when present (capped at 30s), otherwise exponential backoff.
fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    if let ProviderError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// 100ms, 200ms, 400ms, ... capped at 10s.
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
