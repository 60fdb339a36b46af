//! Rule resolution: explicit config id, then case-insensitive name, then first of list.
//!
//! Origin and redirect rules trust an explicit config id differently. An explicit
//! origin config id is returned without asking the service; an explicit redirect
//! config id is looked up in the listing, because the caller needs the full record.

use esa_rules_provider::{EsaApi, NamedRule, RedirectRule};

use crate::error::{CoreError, CoreResult, RuleKind};

/// How the caller picked the rule to update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSelector {
    /// Remote config id; `0` counts as unset.
    pub config_id: Option<i64>,
    /// Rule name; an empty string counts as unset.
    pub rule_name: Option<String>,
}

impl RuleSelector {
    pub fn new(config_id: Option<i64>, rule_name: Option<String>) -> Self {
        Self {
            config_id: config_id.filter(|id| *id != 0),
            rule_name: rule_name.filter(|name| !name.is_empty()),
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// First rule whose trimmed, lowercased name equals the trimmed, lowercased query.
/// A rule without a name compares as `""`.
fn position_by_name<T: NamedRule>(rules: &[T], name: &str) -> Option<usize> {
    let target = normalize(name);
    rules
        .iter()
        .position(|rule| normalize(rule.rule_name().unwrap_or_default()) == target)
}

/// Non-empty rule names in listing order.
fn available_names<T: NamedRule>(rules: &[T]) -> Vec<String> {
    rules
        .iter()
        .filter_map(T::rule_name)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pick one rule out of a fetched listing.
///
/// An explicit config id must match exactly; otherwise the name is matched; otherwise
/// the first rule wins.
pub fn select_rule<T: NamedRule>(
    mut rules: Vec<T>,
    selector: &RuleSelector,
    kind: RuleKind,
) -> CoreResult<T> {
    if let Some(config_id) = selector.config_id {
        let pos = rules
            .iter()
            .position(|rule| rule.config_id() == config_id)
            .ok_or(CoreError::RuleIdNotFound { kind, config_id })?;
        return Ok(rules.swap_remove(pos));
    }

    if let Some(name) = &selector.rule_name {
        return match position_by_name(&rules, name) {
            Some(pos) => Ok(rules.swap_remove(pos)),
            None => Err(CoreError::RuleNameNotFound {
                kind,
                name: name.clone(),
                available: available_names(&rules),
            }),
        };
    }

    if rules.is_empty() {
        return Err(CoreError::NoRules { kind });
    }
    Ok(rules.swap_remove(0))
}

/// Config id of the origin rule to update.
///
/// An explicit config id is returned as-is without any remote call.
pub async fn resolve_origin_config_id(
    api: &dyn EsaApi,
    site_id: i64,
    selector: &RuleSelector,
) -> CoreResult<i64> {
    if let Some(config_id) = selector.config_id {
        log::debug!("Using explicit origin config id {config_id}");
        return Ok(config_id);
    }

    let list = api.list_origin_rules(site_id).await?;
    let rule = select_rule(list.configs, selector, RuleKind::Origin)?;
    log::debug!(
        "Resolved origin rule {:?} -> config id {}",
        rule.rule_name,
        rule.config_id
    );
    Ok(rule.config_id)
}

/// Full redirect rule record to update; always fetched, explicit ids included.
pub async fn resolve_redirect_rule(
    api: &dyn EsaApi,
    site_id: i64,
    selector: &RuleSelector,
) -> CoreResult<RedirectRule> {
    let list = api.list_redirect_rules(site_id).await?;
    let rule = select_rule(list.configs, selector, RuleKind::Redirect)?;
    log::debug!(
        "Resolved redirect rule {:?} -> config id {}",
        rule.rule_name,
        rule.config_id
    );
    Ok(rule)
}
