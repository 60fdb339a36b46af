//! 业务逻辑服务层

mod rule_service;

pub use rule_service::{OriginChange, OriginUpdate, RedirectPortChange, RuleListing, RuleService};
