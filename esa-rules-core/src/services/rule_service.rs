//! 回源规则 / 重定向规则服务

use std::sync::Arc;

use esa_rules_provider::{
    EsaApi, OriginRule, OriginScheme, RedirectRule, RuleList, UpdateOriginRuleRequest,
    UpdateRedirectRuleRequest, UpdateRuleResponse,
};

use crate::error::{CoreError, CoreResult};
use crate::resolver::{RuleSelector, resolve_origin_config_id, resolve_redirect_rule};
use crate::rewrite::rewrite_redirect_port;

/// Both listings of a site. Each half fails on its own.
#[derive(Debug)]
pub struct RuleListing {
    pub origin: CoreResult<RuleList<OriginRule>>,
    pub redirect: CoreResult<RuleList<RedirectRule>>,
}

/// Requested origin rule change. Zero ports mean "leave unchanged".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginChange {
    pub scheme: OriginScheme,
    pub http_port: Option<u32>,
    pub https_port: Option<u32>,
}

impl OriginChange {
    pub fn new(scheme: OriginScheme, http_port: Option<u32>, https_port: Option<u32>) -> Self {
        Self {
            scheme,
            http_port: http_port.filter(|p| *p != 0),
            https_port: https_port.filter(|p| *p != 0),
        }
    }
}

/// Result of an origin rule update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginUpdate {
    pub config_id: i64,
    pub request_id: String,
}

/// A redirect rule with its target before and after the port rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectPortChange {
    pub rule: RedirectRule,
    pub old_target: String,
    pub new_target: String,
}

impl RedirectPortChange {
    pub fn is_noop(&self) -> bool {
        self.old_target == self.new_target
    }
}

/// Origin / redirect rule operations for one ESA account.
pub struct RuleService {
    api: Arc<dyn EsaApi>,
}

impl RuleService {
    #[must_use]
    pub fn new(api: Arc<dyn EsaApi>) -> Self {
        Self { api }
    }

    /// Fetch both listings one after the other. A failure of one does not stop the other.
    pub async fn list_rules(&self, site_id: i64) -> RuleListing {
        let origin = self
            .api
            .list_origin_rules(site_id)
            .await
            .map_err(CoreError::from);
        if let Err(e) = &origin {
            log::warn!("Listing origin rules of site {site_id} failed: {e}");
        }

        let redirect = self
            .api
            .list_redirect_rules(site_id)
            .await
            .map_err(CoreError::from);
        if let Err(e) = &redirect {
            log::warn!("Listing redirect rules of site {site_id} failed: {e}");
        }

        RuleListing { origin, redirect }
    }

    /// Resolve the origin rule and send one `UpdateOriginRule`.
    pub async fn update_origin_rule(
        &self,
        site_id: i64,
        selector: &RuleSelector,
        change: OriginChange,
    ) -> CoreResult<OriginUpdate> {
        let config_id = resolve_origin_config_id(self.api.as_ref(), site_id, selector).await?;

        let request = UpdateOriginRuleRequest {
            site_id,
            config_id,
            origin_scheme: change.scheme,
            origin_http_port: change.http_port,
            origin_https_port: change.https_port,
        };
        log::info!(
            "Updating origin rule {config_id} of site {site_id}: scheme={} http={:?} https={:?}",
            change.scheme,
            change.http_port,
            change.https_port
        );

        let UpdateRuleResponse { request_id } = self.api.update_origin_rule(&request).await?;
        Ok(OriginUpdate {
            config_id,
            request_id,
        })
    }

    /// Resolve the redirect rule and compute its new target. Nothing is sent yet.
    pub async fn prepare_redirect_port(
        &self,
        site_id: i64,
        selector: &RuleSelector,
        port: u32,
    ) -> CoreResult<RedirectPortChange> {
        let rule = resolve_redirect_rule(self.api.as_ref(), site_id, selector).await?;
        let old_target = rule.target_url.clone().unwrap_or_default();
        let new_target = rewrite_redirect_port(&old_target, port);

        let change = RedirectPortChange {
            rule,
            old_target,
            new_target,
        };
        if change.is_noop() {
            log::warn!(
                "Redirect rule {} target has no http(s) URL; it is sent back unchanged",
                change.rule.config_id
            );
        }
        Ok(change)
    }

    /// Send one `UpdateRedirectRule` carrying the rewritten target.
    pub async fn apply_redirect_port(
        &self,
        site_id: i64,
        change: &RedirectPortChange,
    ) -> CoreResult<UpdateRuleResponse> {
        let request = UpdateRedirectRuleRequest {
            site_id,
            config_id: change.rule.config_id,
            target_url: change.new_target.clone(),
        };
        log::info!(
            "Updating redirect rule {} of site {site_id}",
            change.rule.config_id
        );
        Ok(self.api.update_redirect_rule(&request).await?)
    }
}
