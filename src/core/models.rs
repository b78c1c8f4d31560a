// src/core/models.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter};

use crate::core::errors::ScanError;

// --- Input Models ---

/// A single user-submitted scan, created per user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub raw_url: String,
    /// Accepted and carried for future crawling support. No lookup reads it.
    pub crawl_depth: Option<u32>,
}

impl ScanRequest {
    pub fn new(raw_url: impl Into<String>) -> Self {
        Self { raw_url: raw_url.into(), crawl_depth: None }
    }

    pub fn with_crawl_depth(mut self, depth: u32) -> Self {
        self.crawl_depth = Some(depth);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

/// The host and scheme a scan runs against, derived from a `ScanRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTarget {
    pub hostname: String,
    pub scheme: Scheme,
}

// --- Result Field Models ---

/// Placeholder text shared by every field the pipeline never reached.
const SKIPPED: &str = "skipped (scan aborted)";

/// The A-record set returned by the DNS-over-HTTPS provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DnsRecords {
    /// Addresses in provider order, neither sorted nor deduplicated.
    Addresses(Vec<String>),
    NotFound,
    #[default]
    Skipped,
}

impl DnsRecords {
    /// The address the IP-info step is keyed on.
    pub fn first_address(&self) -> Option<&str> {
        match self {
            DnsRecords::Addresses(addresses) => addresses.first().map(String::as_str),
            _ => None,
        }
    }
}

impl fmt::Display for DnsRecords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsRecords::Addresses(addresses) => write!(f, "{}", addresses.join(", ")),
            DnsRecords::NotFound => write!(f, "no A records found"),
            DnsRecords::Skipped => write!(f, "{SKIPPED}"),
        }
    }
}

/// Geolocation / ownership data for the first resolved address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum IpInfo {
    /// The provider's JSON document, stored verbatim.
    Record(serde_json::Value),
    /// A successful response whose body was not JSON.
    RawBody(String),
    NoAddress,
    #[default]
    Skipped,
}

impl fmt::Display for IpInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpInfo::Record(value) => write!(f, "{value}"),
            IpInfo::RawBody(body) => write!(f, "{body}"),
            IpInfo::NoAddress => write!(f, "no IP address available for lookup"),
            IpInfo::Skipped => write!(f, "{SKIPPED}"),
        }
    }
}

/// Outcome of fetching `/robots.txt` from the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RobotsPolicy {
    /// The exact response body.
    Found(String),
    NotFound,
    FetchError(String),
    #[default]
    Skipped,
}

impl fmt::Display for RobotsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RobotsPolicy::Found(body) => write!(f, "{body}"),
            RobotsPolicy::NotFound => write!(f, "robots.txt not found (HTTP 404)"),
            RobotsPolicy::FetchError(reason) => write!(f, "failed to fetch robots.txt: {reason}"),
            RobotsPolicy::Skipped => write!(f, "{SKIPPED}"),
        }
    }
}

/// Marker for report sections that have no lookup behind them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display)]
pub enum FeatureStatus {
    #[default]
    #[strum(to_string = "not implemented")]
    NotImplemented,
}

// --- Main Report ---

/// The composite reconnaissance report. Every field always holds either real
/// data or an explicit placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScanResult {
    pub target: Option<NormalizedTarget>,
    pub dns_records: DnsRecords,
    pub ip_info: IpInfo,
    pub robots_policy: RobotsPolicy,
    pub whois: FeatureStatus,
    pub subdomains: FeatureStatus,
}

impl ScanResult {
    pub fn for_target(target: NormalizedTarget) -> Self {
        Self { target: Some(target), ..Default::default() }
    }
}

// --- Pipeline State ---

/// Stages a scan moves through. `Failed` is only reachable from the fatal
/// stages: `Validating`, `ResolvingDns` and `ResolvingIpInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display, EnumIter)]
pub enum ScanStage {
    #[default]
    Idle,
    #[strum(to_string = "Validating URL")]
    Validating,
    #[strum(to_string = "Resolving DNS")]
    ResolvingDns,
    #[strum(to_string = "Looking up IP info")]
    ResolvingIpInfo,
    #[strum(to_string = "Fetching robots.txt")]
    FetchingRobots,
    Completed,
    Failed,
}

impl ScanStage {
    pub fn can_fail(self) -> bool {
        matches!(self, ScanStage::Validating | ScanStage::ResolvingDns | ScanStage::ResolvingIpInfo)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ScanStatus {
    #[strum(to_string = "Failed")]
    TotalFailure,
    #[strum(to_string = "Partial")]
    Partial,
    #[strum(to_string = "Complete")]
    Complete,
}

/// What a scan hands back to its caller.
///
/// `result` is `None` only when the URL could not be normalized; in every
/// other case it carries whatever was gathered before `error` (if any) stopped
/// the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    pub result: Option<ScanResult>,
    pub error: Option<ScanError>,
}

impl ScanOutcome {
    pub fn status(&self) -> ScanStatus {
        match (&self.result, &self.error) {
            (None, _) => ScanStatus::TotalFailure,
            (Some(_), Some(_)) => ScanStatus::Partial,
            (Some(_), None) => ScanStatus::Complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_placeholders_render_text() {
        assert_eq!(DnsRecords::NotFound.to_string(), "no A records found");
        assert_eq!(IpInfo::NoAddress.to_string(), "no IP address available for lookup");
        assert_eq!(FeatureStatus::NotImplemented.to_string(), "not implemented");
        assert_eq!(RobotsPolicy::Skipped.to_string(), "skipped (scan aborted)");
        assert_ne!(
            RobotsPolicy::NotFound.to_string(),
            RobotsPolicy::FetchError("500 Internal Server Error".into()).to_string()
        );
    }

    #[test]
    fn test_default_result_has_no_unset_fields() {
        let result = ScanResult::default();
        assert_eq!(result.dns_records, DnsRecords::Skipped);
        assert_eq!(result.ip_info, IpInfo::Skipped);
        assert_eq!(result.robots_policy, RobotsPolicy::Skipped);
        assert_eq!(result.whois, FeatureStatus::NotImplemented);
        assert_eq!(result.subdomains, FeatureStatus::NotImplemented);
    }

    #[test]
    fn test_first_address() {
        let records = DnsRecords::Addresses(vec!["1.1.1.1".into(), "1.0.0.1".into()]);
        assert_eq!(records.first_address(), Some("1.1.1.1"));
        assert_eq!(DnsRecords::NotFound.first_address(), None);
    }

    #[test]
    fn test_only_fatal_stages_can_fail() {
        let failing: Vec<ScanStage> = ScanStage::iter().filter(|s| s.can_fail()).collect();
        assert_eq!(
            failing,
            vec![ScanStage::Validating, ScanStage::ResolvingDns, ScanStage::ResolvingIpInfo]
        );
        assert!(!ScanStage::FetchingRobots.can_fail());
    }

    #[test]
    fn test_outcome_status() {
        let complete = ScanOutcome { result: Some(ScanResult::default()), error: None };
        assert_eq!(complete.status(), ScanStatus::Complete);

        let partial = ScanOutcome {
            result: Some(ScanResult::default()),
            error: Some(ScanError::DnsLookup("503 Service Unavailable".into())),
        };
        assert_eq!(partial.status(), ScanStatus::Partial);

        let failed = ScanOutcome {
            result: None,
            error: Some(ScanError::InvalidUrl { input: String::new(), reason: "empty host".into() }),
        };
        assert_eq!(failed.status(), ScanStatus::TotalFailure);
    }
}
