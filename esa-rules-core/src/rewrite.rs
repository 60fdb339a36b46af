//! Port rewrite for redirect target URLs.
//!
//! Purely textual: the target may be a plain URL or a template expression such as
//! `concat("https://host:8080", http.request.uri)`. Only the first URL-shaped
//! substring is touched, and at most one edit is made.
//!
//! Rules, in order:
//! 1. the first `http(s)://host:port` has its port digits replaced;
//! 2. failing that, the first `http(s)://host` gets `:port` appended to the host;
//! 3. failing that, the input is returned unchanged.
//!
//! A host is a run of characters other than `:`, `/` and `"`.

use std::sync::LazyLock;

use regex::Regex;

static URL_WITH_PORT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"https?://[^:/"]+:(\d+)"#).ok());

static URL_WITHOUT_PORT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"https?://[^:/"]+"#).ok());

/// Set the port of the first URL embedded in `target_url` to `new_port`.
pub fn rewrite_redirect_port(target_url: &str, new_port: u32) -> String {
    if let Some(re) = URL_WITH_PORT.as_ref()
        && let Some(port) = re.captures(target_url).and_then(|caps| caps.get(1))
    {
        return format!(
            "{}{new_port}{}",
            &target_url[..port.start()],
            &target_url[port.end()..]
        );
    }

    if let Some(re) = URL_WITHOUT_PORT.as_ref()
        && let Some(host) = re.find(target_url)
    {
        return format!(
            "{}:{new_port}{}",
            &target_url[..host.end()],
            &target_url[host.end()..]
        );
    }

    target_url.to_string()
}
