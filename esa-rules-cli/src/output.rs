//! Human-readable stdout rendering.

use esa_rules_core::{CoreResult, OriginUpdate, RedirectPortChange, RuleListing};
use esa_rules_provider::{OriginRule, RedirectRule, RuleList, UpdateRuleResponse};

pub const USAGE_ERROR: &str =
    "Error: no action given (use --list, --origin-scheme or --redirect-port)";

fn or_empty(value: Option<&str>) -> &str {
    value.unwrap_or_default()
}

pub fn origin_line(rule: &OriginRule) -> String {
    format!(
        "ID: {}\tName: {}\tScheme: {}\tHTTP: {}\tHTTPS: {}",
        rule.config_id,
        or_empty(rule.rule_name.as_deref()),
        or_empty(rule.origin_scheme.as_deref()),
        or_empty(rule.origin_http_port.as_deref()),
        or_empty(rule.origin_https_port.as_deref()),
    )
}

pub fn redirect_line(rule: &RedirectRule) -> String {
    format!(
        "ID: {}\tName: {}\tType: {}\tTarget: {}",
        rule.config_id,
        or_empty(rule.rule_name.as_deref()),
        or_empty(rule.redirect_type.as_deref()),
        or_empty(rule.target_url.as_deref()),
    )
}

fn section<T>(
    lines: &mut Vec<String>,
    title: &str,
    result: &CoreResult<RuleList<T>>,
    render: fn(&T) -> String,
) {
    lines.push(format!("=== {title} ==="));
    match result {
        Ok(list) => {
            lines.extend(list.configs.iter().map(render));
            if list.is_truncated()
                && let Some(total) = list.total_count
            {
                lines.push(format!("(showing {} of {total})", list.configs.len()));
            }
        }
        Err(e) => lines.push(format!("Failed to list {}: {e}", title.to_lowercase())),
    }
}

/// Both sections; a failed section shows its error and the other is still rendered.
pub fn render_listing(listing: &RuleListing) -> String {
    let mut lines = Vec::new();
    section(&mut lines, "Origin Rules", &listing.origin, origin_line);
    lines.push(String::new());
    section(&mut lines, "Redirect Rules", &listing.redirect, redirect_line);
    lines.join("\n")
}

pub fn render_redirect_plan(change: &RedirectPortChange) -> String {
    [
        format!(
            "Updating redirect rule: {} (ID: {})",
            or_empty(change.rule.rule_name.as_deref()),
            change.rule.config_id
        ),
        format!("Old target: {}", change.old_target),
        format!("New target: {}", change.new_target),
    ]
    .join("\n")
}

pub fn render_redirect_done(response: &UpdateRuleResponse) -> String {
    format!("Redirect rule updated (RequestId: {})", response.request_id)
}

pub fn render_origin_done(update: &OriginUpdate) -> String {
    format!(
        "Origin rule {} updated (RequestId: {})",
        update.config_id, update.request_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use esa_rules_core::CoreError;
    use esa_rules_provider::ProviderError;

    fn origin(id: i64, name: &str) -> OriginRule {
        OriginRule {
            config_id: id,
            rule_name: Some(name.to_string()),
            origin_scheme: Some("https".to_string()),
            origin_http_port: Some("80".to_string()),
            origin_https_port: Some("8443".to_string()),
            ..OriginRule::default()
        }
    }

    fn redirect(id: i64, name: &str, target: &str) -> RedirectRule {
        RedirectRule {
            config_id: id,
            rule_name: Some(name.to_string()),
            redirect_type: Some("dynamic".to_string()),
            target_url: Some(target.to_string()),
            ..RedirectRule::default()
        }
    }

    #[test]
    fn origin_line_format() {
        assert_eq!(
            origin_line(&origin(1, "main")),
            "ID: 1\tName: main\tScheme: https\tHTTP: 80\tHTTPS: 8443"
        );
        assert_eq!(
            origin_line(&OriginRule::default()),
            "ID: 0\tName: \tScheme: \tHTTP: \tHTTPS: "
        );
    }

    #[test]
    fn listing_keeps_redirect_section_after_origin_failure() {
        let listing = RuleListing {
            origin: Err(CoreError::Provider(ProviderError::NetworkError {
                provider: "esa".to_string(),
                detail: "connection reset".to_string(),
            })),
            redirect: Ok(RuleList::new(vec![redirect(5, "r", "https://a.com:8080")])),
        };
        let text = render_listing(&listing);
        assert_eq!(
            text,
            "=== Origin Rules ===\n\
             Failed to list origin rules: [esa] Network error: connection reset\n\
             \n\
             === Redirect Rules ===\n\
             ID: 5\tName: r\tType: dynamic\tTarget: https://a.com:8080"
        );
    }

    #[test]
    fn listing_notes_truncated_page() {
        let mut origin_list = RuleList::new(vec![origin(1, "a"), origin(2, "b")]);
        origin_list.total_count = Some(30);
        let listing = RuleListing {
            origin: Ok(origin_list),
            redirect: Ok(RuleList::new(Vec::new())),
        };
        let text = render_listing(&listing);
        assert!(text.contains("(showing 2 of 30)"));
        assert!(text.ends_with("=== Redirect Rules ==="));
    }

    #[test]
    fn redirect_plan_shows_before_and_after() {
        let change = RedirectPortChange {
            rule: redirect(21, "edge", "https://old.example.com:8080"),
            old_target: "https://old.example.com:8080".to_string(),
            new_target: "https://old.example.com:9090".to_string(),
        };
        assert_eq!(
            render_redirect_plan(&change),
            "Updating redirect rule: edge (ID: 21)\n\
             Old target: https://old.example.com:8080\n\
             New target: https://old.example.com:9090"
        );
    }

    #[test]
    fn completion_lines_carry_request_id() {
        let response = UpdateRuleResponse {
            request_id: "ABC-123".to_string(),
        };
        assert_eq!(
            render_redirect_done(&response),
            "Redirect rule updated (RequestId: ABC-123)"
        );

        let update = OriginUpdate {
            config_id: 11,
            request_id: "DEF-456".to_string(),
        };
        assert_eq!(
            render_origin_done(&update),
            "Origin rule 11 updated (RequestId: DEF-456)"
        );
    }
}
