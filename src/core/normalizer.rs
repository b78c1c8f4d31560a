// src/core/normalizer.rs

use tracing::debug;
use url::{Host, Url};

use crate::core::errors::ScanError;
use crate::core::models::{NormalizedTarget, Scheme};

const MAX_LABEL_LEN: usize = 63;

/// Turns raw user input into the host and scheme a scan runs against.
///
/// Input without a scheme gets `https://` prepended. Input with any scheme
/// other than `http`/`https` is rejected rather than prefixed, so `ftp://host`
/// never turns into a host called `ftp`. Nothing here touches the network.
pub fn normalize(raw: &str) -> Result<NormalizedTarget, ScanError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| ScanError::InvalidUrl { input: raw.to_string(), reason };

    let with_scheme = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else if let Some(scheme) = explicit_scheme(trimmed) {
        return Err(invalid(format!("unsupported scheme '{scheme}'")));
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&with_scheme).map_err(|e| invalid(e.to_string()))?;

    let scheme = match url.scheme() {
        "http" => Scheme::Http,
        "https" => Scheme::Https,
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    };

    let hostname = match url.host() {
        Some(Host::Domain(domain)) => {
            validate_domain(domain).map_err(invalid)?;
            domain.to_string()
        }
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => format!("[{addr}]"),
        None => return Err(invalid("missing host".to_string())),
    };

    debug!(%hostname, %scheme, "Normalized target URL.");
    Ok(NormalizedTarget { hostname, scheme })
}

fn has_http_scheme(input: &str) -> bool {
    ["http://", "https://"].iter().any(|prefix| {
        input
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// The text before a leading `://`, unless that separator sits inside a path
/// or query (`example.com/?next=http://...`).
fn explicit_scheme(input: &str) -> Option<&str> {
    let (head, _) = input.split_once("://")?;
    (!head.contains(['/', '?', '#'])).then_some(head)
}

fn validate_domain(domain: &str) -> Result<(), String> {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    for label in domain.split('.') {
        if label.is_empty() {
            return Err(format!("empty label in host '{domain}'"));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(format!("label '{label}' is longer than {MAX_LABEL_LEN} characters"));
        }
        if let Some(c) = label.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_')) {
            return Err(format!("invalid character '{c}' in host '{domain}'"));
        }
    }
    Ok(())
}
