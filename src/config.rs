// src/config.rs

use color_eyre::eyre::{eyre, Result, WrapErr};
use lazy_static::lazy_static;
use url::Url;

use crate::core::endpoints::{ReconConfig, IP_PLACEHOLDER};
use crate::logging::PROJECT_NAME;

lazy_static! {
    pub static ref DOH_ENDPOINT_ENV: String = format!("{}_DOH_ENDPOINT", PROJECT_NAME.clone());
    pub static ref IPINFO_ENDPOINT_ENV: String = format!("{}_IPINFO_ENDPOINT", PROJECT_NAME.clone());
    pub static ref USER_AGENT_ENV: String = format!("{}_USER_AGENT", PROJECT_NAME.clone());
}

/// Builds the scanner configuration from the defaults and any overrides in
/// the environment.
pub fn load_config() -> Result<ReconConfig> {
    apply_overrides(ReconConfig::default(), |key| std::env::var(key).ok())
}

fn apply_overrides(mut config: ReconConfig, lookup: impl Fn(&str) -> Option<String>) -> Result<ReconConfig> {
    if let Some(raw) = lookup(&DOH_ENDPOINT_ENV) {
        config.doh_endpoint = Url::parse(&raw)
            .wrap_err_with(|| format!("{} is not a valid URL: {raw}", *DOH_ENDPOINT_ENV))?;
    }

    if let Some(template) = lookup(&IPINFO_ENDPOINT_ENV) {
        if !template.contains(IP_PLACEHOLDER) {
            return Err(eyre!("{} must contain the {IP_PLACEHOLDER} placeholder", *IPINFO_ENDPOINT_ENV));
        }
        config.ipinfo_endpoint = template;
    }

    if let Some(user_agent) = lookup(&USER_AGENT_ENV) {
        config.user_agent = user_agent;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_names_follow_crate_name() {
        assert_eq!(*DOH_ENDPOINT_ENV, "RECON_RS_DOH_ENDPOINT");
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let config = apply_overrides(ReconConfig::default(), lookup_from(&[])).unwrap();
        assert_eq!(config, ReconConfig::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = apply_overrides(
            ReconConfig::default(),
            lookup_from(&[
                ("RECON_RS_DOH_ENDPOINT", "https://cloudflare-dns.com/dns-query"),
                ("RECON_RS_IPINFO_ENDPOINT", "https://ipapi.co/{ip}/json/"),
                ("RECON_RS_USER_AGENT", "audit-bot/1.0"),
            ]),
        )
        .unwrap();
        assert_eq!(config.doh_endpoint.as_str(), "https://cloudflare-dns.com/dns-query");
        assert_eq!(config.ipinfo_url("1.1.1.1").unwrap().as_str(), "https://ipapi.co/1.1.1.1/json/");
        assert_eq!(config.user_agent, "audit-bot/1.0");
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        assert!(apply_overrides(ReconConfig::default(), lookup_from(&[("RECON_RS_DOH_ENDPOINT", "not a url")])).is_err());
        assert!(
            apply_overrides(ReconConfig::default(), lookup_from(&[("RECON_RS_IPINFO_ENDPOINT", "https://ipinfo.io/json")]))
                .is_err()
        );
    }
}
