// Feed endpoint configuration.
//
// The base URL is resolved once at startup; everything else (status,
// trigger, reset, socket) is derived from it.

const BASE_URL_ENV: &str = "OBSERVATORY_BASE_URL";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    base_http: String,
}

impl FeedConfig {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base_http: normalize_base_url(base.into()),
        }
    }

    pub fn from_env() -> Self {
        let base = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base)
    }

    pub fn base_http(&self) -> &str {
        &self.base_http
    }

    pub fn status_url(&self) -> String {
        format!("{}/api/evolution/status", self.base_http)
    }

    pub fn trigger_url(&self) -> String {
        format!("{}/api/evolution/trigger", self.base_http)
    }

    pub fn reset_url(&self) -> String {
        format!("{}/api/evolution/reset", self.base_http)
    }

    /// ws/wss endpoint derived from the http/https base by scheme swap.
    pub fn ws_url(&self) -> String {
        let base = &self.base_http;
        let origin = if base.starts_with("https://") {
            base.replacen("https://", "wss://", 1)
        } else if base.starts_with("http://") {
            base.replacen("http://", "ws://", 1)
        } else if base.starts_with("wss://") || base.starts_with("ws://") {
            base.clone()
        } else {
            format!("ws://{base}")
        };
        format!("{origin}/api/evolution/ws")
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Strip fragment, path, and trailing slashes; keep scheme://host[:port].
fn normalize_base_url(mut url: String) -> String {
    if let Some(idx) = url.find('#') {
        url.truncate(idx);
    }
    if let Some(scheme_end) = url.find("://") {
        let rest = &url[scheme_end + 3..];
        if let Some(slash) = rest.find('/') {
            url.truncate(scheme_end + 3 + slash);
        }
    }
    url.trim_end_matches('/').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized_to_origin() {
        let cfg = FeedConfig::new("http://observatory.local:3000/some/page#frag");
        assert_eq!(cfg.base_http(), "http://observatory.local:3000");
    }

    #[test]
    fn rest_urls_share_the_base() {
        let cfg = FeedConfig::new("http://localhost:3000");
        assert_eq!(cfg.status_url(), "http://localhost:3000/api/evolution/status");
        assert_eq!(cfg.trigger_url(), "http://localhost:3000/api/evolution/trigger");
        assert_eq!(cfg.reset_url(), "http://localhost:3000/api/evolution/reset");
    }

    #[test]
    fn ws_url_swaps_scheme() {
        let cfg = FeedConfig::new("http://localhost:3000");
        assert_eq!(cfg.ws_url(), "ws://localhost:3000/api/evolution/ws");

        let cfg = FeedConfig::new("https://observatory.example.com");
        assert_eq!(
            cfg.ws_url(),
            "wss://observatory.example.com/api/evolution/ws"
        );
    }

    #[test]
    fn bare_host_gets_a_ws_scheme() {
        let cfg = FeedConfig::new("observatory.local:8080");
        assert_eq!(cfg.ws_url(), "ws://observatory.local:8080/api/evolution/ws");
    }
}
