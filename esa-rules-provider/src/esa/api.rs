//! ESA `EsaApi` trait 实现

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use crate::error::Result;
use crate::traits::{EsaApi, ErrorContext, ProviderErrorMapper};
use crate::types::{
    OriginRule, RedirectRule, RuleList, UpdateOriginRuleRequest, UpdateRedirectRuleRequest,
    UpdateRuleResponse,
};

use super::{EsaClient, ListRulesResponse, UpdateRuleResponseBody};

#[derive(Serialize)]
struct ListRulesRequest {
    #[serde(rename = "SiteId")]
    site_id: i64,
}

impl EsaClient {
    async fn list_rules<T>(&self, action: &str, site_id: i64) -> Result<RuleList<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let response: ListRulesResponse<T> = self
            .request(
                Method::GET,
                action,
                &ListRulesRequest { site_id },
                ErrorContext::site(site_id),
            )
            .await?;

        let list = RuleList::from(response);
        if list.is_truncated() {
            log::warn!(
                "[{}] {action}: site {site_id} has {} rules but only {} were returned",
                self.provider_name(),
                list.total_count.unwrap_or_default(),
                list.configs.len()
            );
        }
        Ok(list)
    }
}

fn request_id_of(body: UpdateRuleResponseBody) -> UpdateRuleResponse {
    UpdateRuleResponse {
        request_id: body.request_id.unwrap_or_default(),
    }
}

#[async_trait]
impl EsaApi for EsaClient {
    fn id(&self) -> &'static str {
        self.provider_name()
    }

    async fn list_origin_rules(&self, site_id: i64) -> Result<RuleList<OriginRule>> {
        self.list_rules("ListOriginRules", site_id).await
    }

    async fn update_origin_rule(
        &self,
        req: &UpdateOriginRuleRequest,
    ) -> Result<UpdateRuleResponse> {
        #[derive(Serialize)]
        struct UpdateOriginRuleParams {
            #[serde(rename = "SiteId")]
            site_id: i64,
            #[serde(rename = "ConfigId")]
            config_id: i64,
            #[serde(rename = "OriginScheme")]
            origin_scheme: &'static str,
            /// 端口以字符串传递，未设置时不发送
            #[serde(rename = "OriginHttpPort", skip_serializing_if = "Option::is_none")]
            origin_http_port: Option<String>,
            #[serde(rename = "OriginHttpsPort", skip_serializing_if = "Option::is_none")]
            origin_https_port: Option<String>,
        }

        let params = UpdateOriginRuleParams {
            site_id: req.site_id,
            config_id: req.config_id,
            origin_scheme: req.origin_scheme.as_str(),
            origin_http_port: req.origin_http_port.map(|p| p.to_string()),
            origin_https_port: req.origin_https_port.map(|p| p.to_string()),
        };

        let body: UpdateRuleResponseBody = self
            .request(
                Method::POST,
                "UpdateOriginRule",
                &params,
                ErrorContext::rule(req.site_id, req.config_id),
            )
            .await?;
        Ok(request_id_of(body))
    }

    async fn list_redirect_rules(&self, site_id: i64) -> Result<RuleList<RedirectRule>> {
        self.list_rules("ListRedirectRules", site_id).await
    }

    async fn update_redirect_rule(
        &self,
        req: &UpdateRedirectRuleRequest,
    ) -> Result<UpdateRuleResponse> {
        #[derive(Serialize)]
        struct UpdateRedirectRuleParams<'a> {
            #[serde(rename = "SiteId")]
            site_id: i64,
            #[serde(rename = "ConfigId")]
            config_id: i64,
            #[serde(rename = "TargetUrl")]
            target_url: &'a str,
        }

        let params = UpdateRedirectRuleParams {
            site_id: req.site_id,
            config_id: req.config_id,
            target_url: &req.target_url,
        };

        let body: UpdateRuleResponseBody = self
            .request(
                Method::POST,
                "UpdateRedirectRule",
                &params,
                ErrorContext::rule(req.site_id, req.config_id),
            )
            .await?;
        Ok(request_id_of(body))
    }
}
