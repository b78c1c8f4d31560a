// src/core/errors.rs

use thiserror::Error;

/// Errors that stop a scan. Robots.txt failures never show up here: they are
/// absorbed into `RobotsPolicy`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("DNS lookup failed: {0}")]
    DnsLookup(String),

    #[error("IP info lookup failed: {0}")]
    IpInfo(String),
}

/// A request that never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("could not connect to {host}: {reason}")]
    Connect { host: String, reason: String },

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("could not read response body from {url}: {reason}")]
    Body { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_upstream_status() {
        let err = ScanError::DnsLookup("503 Service Unavailable".to_string());
        assert_eq!(err.to_string(), "DNS lookup failed: 503 Service Unavailable");

        let err = ScanError::InvalidUrl { input: "ht!tp://".into(), reason: "unsupported scheme 'ht!tp'".into() };
        assert!(err.to_string().contains("ht!tp://"));
    }
}
