//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use esa_rules_provider::{ClientConfig, Credentials, EsaClient};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(res.is_ok(), "{}: {res:?}", format_args!($($msg)+));
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 集成测试上下文
pub struct TestContext {
    pub client: EsaClient,
    pub site_id: i64,
}

impl TestContext {
    /// 从 `ALIBABA_CLOUD_ACCESS_KEY_ID`、`ALIBABA_CLOUD_ACCESS_KEY_SECRET`、
    /// `ESA_TEST_REGION`（默认 cn-hangzhou）和 `ESA_TEST_SITE_ID` 构建
    pub fn from_env() -> Option<Self> {
        let region = env::var("ESA_TEST_REGION").unwrap_or_else(|_| "cn-hangzhou".to_string());
        let site_id = env::var("ESA_TEST_SITE_ID").ok()?.parse().ok()?;
        let config = ClientConfig::new(region, Credentials::from_env_or(None, None));
        let client = EsaClient::new(&config).ok()?;
        Some(Self { client, site_id })
    }
}
