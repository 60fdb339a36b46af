//! ESA RPC 风格请求：参数放在 query string，body 为空

use chrono::Utc;
use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ProviderError, Result};
use crate::http_client::{HttpUtils, RequestLabel};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::{EMPTY_BODY_SHA256, ESA_API_VERSION, EsaClient, serialize_to_query_string};

/// Pull `Code`/`Message` out of a body, if it is an API error envelope.
fn api_error_of(value: &serde_json::Value) -> Option<RawApiError> {
    let code = value.get("Code").and_then(|v| v.as_str())?;
    let message = value.get("Message").and_then(|v| v.as_str())?;
    Some(RawApiError::with_code(code, message))
}

impl EsaClient {
    /// 执行 ESA API 请求
    pub(crate) async fn request<T, B>(
        &self,
        method: Method,
        action: &str,
        params: &B,
        ctx: ErrorContext,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let query_string = serialize_to_query_string(params)?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let nonce = uuid::Uuid::new_v4().to_string();
        let authorization = self.sign(method.as_str(), action, &query_string, &timestamp, &nonce);

        let url = if query_string.is_empty() {
            format!("https://{}/", self.endpoint)
        } else {
            format!("https://{}/?{query_string}", self.endpoint)
        };

        let request = self
            .client
            .request(method.clone(), &url)
            .header("Host", &self.endpoint)
            .header("x-acs-action", action)
            .header("x-acs-version", ESA_API_VERSION)
            .header("x-acs-date", &timestamp)
            .header("x-acs-signature-nonce", &nonce)
            .header("x-acs-content-sha256", EMPTY_BODY_SHA256)
            .header("Authorization", authorization);

        let label = RequestLabel {
            provider: self.provider_name(),
            method: method.as_str(),
            action,
        };
        let (status, response_text) =
            HttpUtils::execute_request_with_retry(request, label, self.retry_budget(&method))
                .await?;

        if status >= 400 {
            if let Some(raw) = serde_json::from_str::<serde_json::Value>(&response_text)
                .ok()
                .as_ref()
                .and_then(api_error_of)
            {
                return Err(self.report(raw, ctx));
            }
            return Err(ProviderError::NetworkError {
                provider: self.provider_name().to_string(),
                detail: format!("HTTP {status}: {}", truncate_for_log(&response_text)),
            });
        }

        let value: serde_json::Value = HttpUtils::parse_json(&response_text, self.provider_name())?;
        if let Some(raw) = api_error_of(&value) {
            return Err(self.report(raw, ctx));
        }

        serde_json::from_value(value).map_err(|e| ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: e.to_string(),
        })
    }

    /// Only GET (list) calls are retried; an update is sent exactly once.
    fn retry_budget(&self, method: &Method) -> u32 {
        if *method == Method::GET {
            self.max_retries
        } else {
            0
        }
    }

    fn report(&self, raw: RawApiError, ctx: ErrorContext) -> ProviderError {
        let err = self.map_error(raw, ctx);
        if err.is_expected() {
            log::warn!("API error: {err}");
        } else {
            log::error!("API error: {err}");
        }
        err
    }
}
