//! Command line arguments and dispatch selection.

use clap::{Parser, ValueEnum};
use esa_rules_core::{OriginChange, RuleSelector};
use esa_rules_provider::{
    ACCESS_KEY_ID_ENV, ACCESS_KEY_SECRET_ENV, ClientConfig, Credentials, OriginScheme,
};

/// List or update Alibaba Cloud ESA origin and redirect rules.
///
/// With `--list` both rule lists are printed. Otherwise `--redirect-port` rewrites the
/// port of a redirect rule target, and `--origin-scheme` updates an origin rule.
#[derive(Debug, Parser)]
#[command(name = "esa-rules", version, about, long_about = None)]
pub struct Args {
    /// Region id, e.g. cn-hangzhou
    #[arg(long)]
    pub region_id: String,

    /// Site id
    #[arg(long)]
    pub site_id: i64,

    /// Rule config id (0 = not provided)
    #[arg(long)]
    pub config_id: Option<i64>,

    /// Rule name, matched case-insensitively after trimming
    #[arg(long)]
    pub rule_name: Option<String>,

    /// Origin scheme
    #[arg(long, value_enum)]
    pub origin_scheme: Option<SchemeArg>,

    /// Origin HTTP port (0 = leave unchanged)
    #[arg(long)]
    pub http_port: Option<u32>,

    /// Origin HTTPS port (0 = leave unchanged)
    #[arg(long)]
    pub https_port: Option<u32>,

    /// New port for the redirect rule target URL
    #[arg(long)]
    pub redirect_port: Option<u32>,

    /// AccessKey id
    #[arg(long, env = ACCESS_KEY_ID_ENV, hide_env_values = true)]
    pub access_key_id: Option<String>,

    /// AccessKey secret
    #[arg(long, env = ACCESS_KEY_SECRET_ENV, hide_env_values = true)]
    pub access_key_secret: Option<String>,

    /// List origin and redirect rules
    #[arg(long)]
    pub list: bool,

    /// Override the API endpoint (default esa.<region>.aliyuncs.com)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Retries of list calls on transient network errors (updates are sent once)
    #[arg(long, default_value_t = 0)]
    pub max_retries: u32,

    /// Log filter when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// `--origin-scheme` values, matched case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemeArg {
    Http,
    Https,
    /// Same protocol as the client request
    Follow,
}

impl From<SchemeArg> for OriginScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Http => Self::Http,
            SchemeArg::Https => Self::Https,
            SchemeArg::Follow => Self::Follow,
        }
    }
}

/// What a single invocation does. Exactly one branch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    UpdateRedirectPort { port: u32 },
    UpdateOrigin(OriginChange),
    Usage,
}

impl Args {
    /// `--list` first, then a non-zero redirect port, then an origin scheme.
    pub fn action(&self) -> Command {
        if self.list {
            return Command::List;
        }
        if let Some(port) = self.redirect_port.filter(|p| *p != 0) {
            return Command::UpdateRedirectPort { port };
        }
        match self.origin_scheme {
            Some(scheme) => Command::UpdateOrigin(OriginChange::new(
                scheme.into(),
                self.http_port,
                self.https_port,
            )),
            None => Command::Usage,
        }
    }

    pub fn selector(&self) -> RuleSelector {
        RuleSelector::new(self.config_id, self.rule_name.clone())
    }

    pub fn client_config(&self) -> ClientConfig {
        let credentials = Credentials::from_env_or(
            self.access_key_id.as_deref(),
            self.access_key_secret.as_deref(),
        );
        ClientConfig::new(&self.region_id, credentials)
            .with_endpoint(self.endpoint.clone())
            .with_max_retries(self.max_retries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["esa-rules", "--region-id", "cn-hangzhou", "--site-id", "123"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn region_and_site_are_required() {
        assert!(Args::try_parse_from(["esa-rules", "--site-id", "1"]).is_err());
        assert!(Args::try_parse_from(["esa-rules", "--region-id", "cn-hangzhou"]).is_err());
    }

    #[test]
    fn rejects_unknown_origin_scheme() {
        let argv = [
            "esa-rules",
            "--region-id",
            "cn-hangzhou",
            "--site-id",
            "1",
            "--origin-scheme",
            "ftp",
        ];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn origin_scheme_is_case_sensitive() {
        let argv = [
            "esa-rules",
            "--region-id",
            "cn-hangzhou",
            "--site-id",
            "1",
            "--origin-scheme",
            "HTTPS",
        ];
        assert!(Args::try_parse_from(argv).is_err());

        for (value, expected) in [
            ("http", OriginScheme::Http),
            ("https", OriginScheme::Https),
            ("follow", OriginScheme::Follow),
        ] {
            let args = parse(&["--origin-scheme", value]);
            assert_eq!(
                args.action(),
                Command::UpdateOrigin(OriginChange::new(expected, None, None))
            );
        }
    }

    #[test]
    fn no_action_is_usage() {
        assert_eq!(parse(&[]).action(), Command::Usage);
        assert_eq!(parse(&["--rule-name", "x"]).action(), Command::Usage);
    }

    #[test]
    fn list_wins_over_updates() {
        let args = parse(&["--list", "--redirect-port", "8443", "--origin-scheme", "https"]);
        assert_eq!(args.action(), Command::List);
    }

    #[test]
    fn redirect_port_wins_over_origin_scheme() {
        let args = parse(&["--redirect-port", "8443", "--origin-scheme", "https"]);
        assert_eq!(args.action(), Command::UpdateRedirectPort { port: 8443 });
    }

    #[test]
    fn zero_redirect_port_falls_through() {
        let args = parse(&["--redirect-port", "0", "--origin-scheme", "follow"]);
        assert_eq!(
            args.action(),
            Command::UpdateOrigin(OriginChange::new(OriginScheme::Follow, None, None))
        );
    }

    #[test]
    fn origin_ports_of_zero_are_omitted() {
        let args = parse(&[
            "--origin-scheme",
            "https",
            "--http-port",
            "0",
            "--https-port",
            "8443",
        ]);
        let Command::UpdateOrigin(change) = args.action() else {
            panic!("expected origin update, got {:?}", args.action());
        };
        assert_eq!(change.scheme, OriginScheme::Https);
        assert_eq!(change.http_port, None);
        assert_eq!(change.https_port, Some(8443));
    }

    #[test]
    fn selector_ignores_zero_id_and_empty_name() {
        let args = parse(&["--config-id", "0", "--rule-name", ""]);
        assert_eq!(args.selector(), RuleSelector::default());

        let args = parse(&["--config-id", "42", "--rule-name", "edge"]);
        assert_eq!(args.selector().config_id, Some(42));
        assert_eq!(args.selector().rule_name.as_deref(), Some("edge"));
    }

    #[test]
    fn client_config_carries_overrides() {
        let args = parse(&[
            "--access-key-id",
            "flag-id",
            "--access-key-secret",
            "flag-secret",
            "--endpoint",
            "esa.example.internal",
            "--max-retries",
            "2",
        ]);
        let config = args.client_config();
        assert_eq!(config.region_id, "cn-hangzhou");
        assert_eq!(config.endpoint(), "esa.example.internal");
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.credentials, Credentials::new("flag-id", "flag-secret"));
    }

    #[test]
    fn defaults() {
        let args = parse(&[]);
        assert_eq!(args.max_retries, 0);
        assert_eq!(args.log_level, "warn");
        assert!(!args.list);
        assert_eq!(args.client_config().endpoint(), "esa.cn-hangzhou.aliyuncs.com");
    }
}
