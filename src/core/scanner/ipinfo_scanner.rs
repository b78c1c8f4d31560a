// src/core/scanner/ipinfo_scanner.rs

use tracing::{debug, info, warn};

use crate::core::endpoints::ReconConfig;
use crate::core::errors::ScanError;
use crate::core::models::{DnsRecords, IpInfo};
use crate::core::transport::{HttpRequest, HttpTransport};

/// Looks up ownership and geolocation for the first resolved address.
///
/// Only the first address is queried. With no address there is nothing to
/// look up, so the field gets its placeholder and no request is sent.
pub async fn run_ipinfo_lookup<T: HttpTransport + ?Sized>(
    transport: &T,
    config: &ReconConfig,
    records: &DnsRecords,
) -> Result<IpInfo, ScanError> {
    let Some(ip) = records.first_address() else {
        debug!("No address resolved, skipping IP info lookup.");
        return Ok(IpInfo::NoAddress);
    };

    info!(ip, "Starting IP info lookup.");
    let url = config
        .ipinfo_url(ip)
        .map_err(|e| ScanError::IpInfo(format!("invalid lookup URL for '{ip}': {e}")))?;

    let response = transport
        .get(HttpRequest::get(url).accept("application/json"))
        .await
        .map_err(|e| ScanError::IpInfo(e.to_string()))?;

    if !response.is_success() {
        warn!(ip, status = %response.status, "IP info provider returned an error status.");
        return Err(ScanError::IpInfo(response.status_text()));
    }

    match serde_json::from_str(&response.body) {
        Ok(value) => {
            info!(ip, "IP info lookup finished.");
            Ok(IpInfo::Record(value))
        }
        Err(e) => {
            warn!(ip, error = %e, "IP info body is not JSON, keeping raw body.");
            Ok(IpInfo::RawBody(response.body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::mock::MockTransport;
    use serde_json::json;

    const IPINFO: &str = "https://ipinfo.io/";

    #[tokio::test]
    async fn test_only_first_address_is_queried() {
        let transport = MockTransport::new().respond(IPINFO, 200, r#"{"ip":"93.184.216.34","org":"AS15133"}"#);
        let records = DnsRecords::Addresses(vec!["93.184.216.34".into(), "93.184.216.35".into()]);

        let info = run_ipinfo_lookup(&transport, &ReconConfig::default(), &records).await.unwrap();

        assert_eq!(info, IpInfo::Record(json!({"ip": "93.184.216.34", "org": "AS15133"})));
        assert_eq!(transport.calls_to(IPINFO), vec!["https://ipinfo.io/93.184.216.34/json"]);
    }

    #[tokio::test]
    async fn test_record_keeps_provider_key_order() {
        let body = r#"{"ip":"93.184.216.34","hostname":"x","city":"Norwell","country":"US"}"#;
        let transport = MockTransport::new().respond(IPINFO, 200, body);
        let records = DnsRecords::Addresses(vec!["93.184.216.34".into()]);

        let info = run_ipinfo_lookup(&transport, &ReconConfig::default(), &records).await.unwrap();

        assert!(matches!(info, IpInfo::Record(_)));
        assert_eq!(info.to_string(), body);
    }

    #[tokio::test]
    async fn test_no_address_makes_no_request() {
        let transport = MockTransport::new();
        for records in [DnsRecords::NotFound, DnsRecords::Addresses(Vec::new())] {
            let info = run_ipinfo_lookup(&transport, &ReconConfig::default(), &records).await.unwrap();
            assert_eq!(info, IpInfo::NoAddress);
        }
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_error_status_is_fatal() {
        let transport = MockTransport::new().respond(IPINFO, 429, "rate limited");
        let records = DnsRecords::Addresses(vec!["1.1.1.1".into()]);
        let err = run_ipinfo_lookup(&transport, &ReconConfig::default(), &records).await.unwrap_err();
        assert_eq!(err, ScanError::IpInfo("429 Too Many Requests".into()));
    }

    #[tokio::test]
    async fn test_non_json_body_falls_back_to_raw() {
        let transport = MockTransport::new().respond(IPINFO, 200, "1.1.1.1 - APNIC");
        let records = DnsRecords::Addresses(vec!["1.1.1.1".into()]);
        let info = run_ipinfo_lookup(&transport, &ReconConfig::default(), &records).await.unwrap();
        assert_eq!(info, IpInfo::RawBody("1.1.1.1 - APNIC".into()));
    }
}
