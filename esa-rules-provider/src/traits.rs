use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    OriginRule, RedirectRule, RuleList, UpdateOriginRuleRequest, UpdateRedirectRuleRequest,
    UpdateRuleResponse,
};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码，如 `InvalidAccessKeyId.NotFound`
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 映射错误时补充请求里的站点和规则 ID
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ErrorContext {
    pub site_id: Option<i64>,
    pub config_id: Option<i64>,
}

impl ErrorContext {
    pub fn site(site_id: i64) -> Self {
        Self {
            site_id: Some(site_id),
            config_id: None,
        }
    }

    pub fn rule(site_id: i64, config_id: i64) -> Self {
        Self {
            site_id: Some(site_id),
            config_id: Some(config_id),
        }
    }
}

/// 将原始 API 错误映射到统一错误类型（内部使用）
pub(crate) trait ProviderErrorMapper {
    fn provider_name(&self) -> &'static str;

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// The four ESA rule operations this tool consumes.
///
/// Implemented by [`EsaClient`](crate::EsaClient); tests substitute in-memory fakes.
#[async_trait]
pub trait EsaApi: Send + Sync {
    /// Service identifier used in logs and error messages.
    fn id(&self) -> &'static str;

    /// `ListOriginRules`, first page only.
    async fn list_origin_rules(&self, site_id: i64) -> Result<RuleList<OriginRule>>;

    /// `UpdateOriginRule`.
    async fn update_origin_rule(&self, req: &UpdateOriginRuleRequest)
    -> Result<UpdateRuleResponse>;

    /// `ListRedirectRules`, first page only.
    async fn list_redirect_rules(&self, site_id: i64) -> Result<RuleList<RedirectRule>>;

    /// `UpdateRedirectRule`.
    async fn update_redirect_rule(
        &self,
        req: &UpdateRedirectRuleRequest,
    ) -> Result<UpdateRuleResponse>;
}
