//! 测试辅助模块
//!
//! 提供内存版 `EsaApi` 和规则工厂方法。

use async_trait::async_trait;
use esa_rules_provider::{
    EsaApi, OriginRule, ProviderError, RedirectRule, Result, RuleList, UpdateOriginRuleRequest,
    UpdateRedirectRuleRequest, UpdateRuleResponse,
};
use tokio::sync::RwLock;

// ===== MockEsaApi =====

pub struct MockEsaApi {
    origin_rules: RwLock<std::result::Result<Vec<OriginRule>, ProviderError>>,
    redirect_rules: RwLock<std::result::Result<Vec<RedirectRule>, ProviderError>>,
    /// 如果 Some，update 时返回此错误
    update_error: RwLock<Option<ProviderError>>,
    origin_list_calls: RwLock<usize>,
    redirect_list_calls: RwLock<usize>,
    origin_updates: RwLock<Vec<UpdateOriginRuleRequest>>,
    redirect_updates: RwLock<Vec<UpdateRedirectRuleRequest>>,
}

impl MockEsaApi {
    pub fn new() -> Self {
        Self {
            origin_rules: RwLock::new(Ok(Vec::new())),
            redirect_rules: RwLock::new(Ok(Vec::new())),
            update_error: RwLock::new(None),
            origin_list_calls: RwLock::new(0),
            redirect_list_calls: RwLock::new(0),
            origin_updates: RwLock::new(Vec::new()),
            redirect_updates: RwLock::new(Vec::new()),
        }
    }

    pub fn with_origin_rules(mut self, rules: Vec<OriginRule>) -> Self {
        *self.origin_rules.get_mut() = Ok(rules);
        self
    }

    pub fn with_redirect_rules(mut self, rules: Vec<RedirectRule>) -> Self {
        *self.redirect_rules.get_mut() = Ok(rules);
        self
    }

    pub fn with_origin_error(mut self, err: ProviderError) -> Self {
        *self.origin_rules.get_mut() = Err(err);
        self
    }

    pub fn with_redirect_error(mut self, err: ProviderError) -> Self {
        *self.redirect_rules.get_mut() = Err(err);
        self
    }

    pub fn with_update_error(mut self, err: ProviderError) -> Self {
        *self.update_error.get_mut() = Some(err);
        self
    }

    pub async fn origin_list_calls(&self) -> usize {
        *self.origin_list_calls.read().await
    }

    pub async fn redirect_list_calls(&self) -> usize {
        *self.redirect_list_calls.read().await
    }

    pub async fn origin_updates(&self) -> Vec<UpdateOriginRuleRequest> {
        self.origin_updates.read().await.clone()
    }

    pub async fn redirect_updates(&self) -> Vec<UpdateRedirectRuleRequest> {
        self.redirect_updates.read().await.clone()
    }

    async fn check_update_error(&self) -> Result<()> {
        match &*self.update_error.read().await {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EsaApi for MockEsaApi {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn list_origin_rules(&self, _site_id: i64) -> Result<RuleList<OriginRule>> {
        *self.origin_list_calls.write().await += 1;
        self.origin_rules.read().await.clone().map(RuleList::new)
    }

    async fn update_origin_rule(
        &self,
        req: &UpdateOriginRuleRequest,
    ) -> Result<UpdateRuleResponse> {
        self.check_update_error().await?;
        let mut updates = self.origin_updates.write().await;
        updates.push(req.clone());
        Ok(UpdateRuleResponse {
            request_id: format!("req-origin-{}", updates.len()),
        })
    }

    async fn list_redirect_rules(&self, _site_id: i64) -> Result<RuleList<RedirectRule>> {
        *self.redirect_list_calls.write().await += 1;
        self.redirect_rules.read().await.clone().map(RuleList::new)
    }

    async fn update_redirect_rule(
        &self,
        req: &UpdateRedirectRuleRequest,
    ) -> Result<UpdateRuleResponse> {
        self.check_update_error().await?;
        let mut updates = self.redirect_updates.write().await;
        updates.push(req.clone());
        Ok(UpdateRuleResponse {
            request_id: format!("req-redirect-{}", updates.len()),
        })
    }
}

// ===== 工厂方法 =====

pub fn origin_rule(config_id: i64, name: &str) -> OriginRule {
    OriginRule {
        config_id,
        rule_name: Some(name.to_string()),
        origin_scheme: Some("http".to_string()),
        origin_http_port: Some("80".to_string()),
        origin_https_port: Some("443".to_string()),
        ..OriginRule::default()
    }
}

pub fn redirect_rule(config_id: i64, name: &str, target_url: &str) -> RedirectRule {
    RedirectRule {
        config_id,
        rule_name: Some(name.to_string()),
        redirect_type: Some("dynamic".to_string()),
        target_url: Some(target_url.to_string()),
        status_code: Some("302".to_string()),
        ..RedirectRule::default()
    }
}
