//! ESA 错误码映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{ESA_PROVIDER_NAME, EsaClient};

impl ProviderErrorMapper for EsaClient {
    fn provider_name(&self) -> &'static str {
        ESA_PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        let code = raw.code.as_deref().unwrap_or_default();

        // 参数类错误码形如 InvalidParameter.OriginScheme / MissingParameter.SiteId
        if let Some(param) = code
            .strip_prefix("InvalidParameter")
            .or_else(|| code.strip_prefix("MissingParameter"))
            .or_else(|| code.strip_prefix("MissingRequiredParameter"))
        {
            return ProviderError::InvalidParameter {
                provider,
                param: param.trim_start_matches('.').to_string(),
                detail: raw.message,
            };
        }

        match code {
            // ============ 认证错误 ============
            "InvalidAccessKeyId.NotFound"
            | "InvalidAccessKeyId.Inactive"
            | "InvalidAccessKeyId"
            | "SignatureDoesNotMatch"
            | "IncompleteSignature"
            | "InvalidTimeStamp.Expired"
            | "SignatureNonceUsed" => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },

            // ============ 权限不足 ============
            "Forbidden" | "Forbidden.RAM" | "Forbidden.NoPermission" | "NoPermission" => {
                ProviderError::PermissionDenied {
                    provider,
                    raw_message: Some(raw.message),
                }
            }

            // ============ 站点不存在 ============
            "SiteNotFound" | "Site.NotFound" | "InvalidSite.NotFound" | "InvalidSiteId" => {
                ProviderError::SiteNotFound {
                    provider,
                    site_id: context.site_id,
                    raw_message: Some(raw.message),
                }
            }

            // ============ 规则不存在 ============
            "ConfigNotFound" | "Config.NotFound" | "InvalidConfigId.NotFound" | "InvalidConfigId" => {
                ProviderError::RuleNotFound {
                    provider,
                    config_id: context.config_id,
                    raw_message: Some(raw.message),
                }
            }

            // ============ 频率限流 ============
            "Throttling" | "Throttling.User" | "Throttling.Api" | "TooManyRequests" => {
                ProviderError::RateLimited {
                    provider,
                    retry_after: None,
                    raw_message: Some(raw.message),
                }
            }

            _ => self.unknown_error(raw),
        }
    }
}
