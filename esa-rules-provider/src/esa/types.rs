//! ESA 请求参数序列化与响应包装

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::types::RuleList;

use super::ESA_PROVIDER_NAME;

// ============ Query string ============

/// 将 `serde_json::Value` 展平为 key-value 对 (嵌套对象用 `.` 连接, 数组下标从 1 开始)
pub fn flatten_value(
    prefix: &str,
    value: &serde_json::Value,
    result: &mut BTreeMap<String, String>,
) {
    match value {
        serde_json::Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten_value(&key, v, result);
            }
        }
        serde_json::Value::Array(arr) => {
            for (i, v) in arr.iter().enumerate() {
                flatten_value(&format!("{prefix}.{}", i + 1), v, result);
            }
        }
        serde_json::Value::String(s) => {
            result.insert(prefix.to_string(), s.clone());
        }
        serde_json::Value::Number(n) => {
            result.insert(prefix.to_string(), n.to_string());
        }
        serde_json::Value::Bool(b) => {
            result.insert(prefix.to_string(), b.to_string());
        }
        serde_json::Value::Null => {}
    }
}

/// 将参数结构体序列化为按 key 排序、RFC3986 编码的 query string（同时也是规范化查询串）
pub fn serialize_to_query_string<T: Serialize>(params: &T) -> Result<String> {
    let value = serde_json::to_value(params).map_err(|e| ProviderError::SerializationError {
        provider: ESA_PROVIDER_NAME.to_string(),
        detail: e.to_string(),
    })?;

    let mut flat_map = BTreeMap::new();
    flatten_value("", &value, &mut flat_map);

    Ok(flat_map
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&"))
}

// ============ 响应结构 ============

/// `ListOriginRules` / `ListRedirectRules` 共用的分页响应
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListRulesResponse<T> {
    pub request_id: Option<String>,
    pub configs: Option<Vec<T>>,
    pub total_count: Option<u32>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub total_page: Option<u32>,
}

impl<T> From<ListRulesResponse<T>> for RuleList<T> {
    fn from(resp: ListRulesResponse<T>) -> Self {
        Self {
            request_id: resp.request_id,
            configs: resp.configs.unwrap_or_default(),
            total_count: resp.total_count,
            page_number: resp.page_number,
            page_size: resp.page_size,
            total_page: resp.total_page,
        }
    }
}

/// 更新类接口只返回 `RequestId`
#[derive(Debug, Deserialize)]
pub struct UpdateRuleResponseBody {
    #[serde(rename = "RequestId")]
    pub request_id: Option<String>,
}
