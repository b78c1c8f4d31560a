// src/core/endpoints.rs

use once_cell::sync::Lazy;
use url::Url;

/// Google's public DNS-over-HTTPS JSON API.
pub static DEFAULT_DOH_ENDPOINT: Lazy<Url> = Lazy::new(|| {
    Url::parse("https://dns.google/resolve").expect("static DoH endpoint is a valid URL")
});

pub const DEFAULT_IPINFO_ENDPOINT: &str = "https://ipinfo.io/{ip}/json";
pub const IP_PLACEHOLDER: &str = "{ip}";
pub const DEFAULT_USER_AGENT: &str = concat!("recon-rs/", env!("CARGO_PKG_VERSION"));

/// Where the scanners send their requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconConfig {
    pub doh_endpoint: Url,
    /// URL template; `{ip}` is replaced with the address being looked up.
    pub ipinfo_endpoint: String,
    pub user_agent: String,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            doh_endpoint: DEFAULT_DOH_ENDPOINT.clone(),
            ipinfo_endpoint: DEFAULT_IPINFO_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ReconConfig {
    pub fn ipinfo_url(&self, ip: &str) -> Result<Url, url::ParseError> {
        Url::parse(&self.ipinfo_endpoint.replace(IP_PLACEHOLDER, ip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipinfo_url_substitutes_address() {
        let config = ReconConfig::default();
        let url = config.ipinfo_url("93.184.216.34").unwrap();
        assert_eq!(url.as_str(), "https://ipinfo.io/93.184.216.34/json");
    }
}
