// src/core/scanner/dns_scanner.rs

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::core::endpoints::ReconConfig;
use crate::core::errors::ScanError;
use crate::core::models::DnsRecords;
use crate::core::transport::{HttpRequest, HttpTransport};

/// Media type of the JSON flavour of DNS-over-HTTPS answers.
pub const DNS_JSON: &str = "application/dns-json";

/// RR type number for A records.
const RECORD_TYPE_A: u16 = 1;

#[derive(Debug, Deserialize)]
struct DohResponse {
    #[serde(rename = "Answer", default)]
    answer: Option<Vec<DohAnswer>>,
}

#[derive(Debug, Deserialize)]
struct DohAnswer {
    data: String,
    #[serde(rename = "type", default)]
    record_type: Option<u16>,
}

/// Resolves the A records of `hostname` through the configured DoH provider.
///
/// Any failure here is fatal for the scan: a non-2xx status, a transport error
/// or a body that is not a DoH JSON document all become `ScanError::DnsLookup`.
/// An empty or missing `Answer` is not an error and yields `DnsRecords::NotFound`.
///
/// Answers typed as anything other than A (the CNAME hops of an alias chain)
/// are filtered out. The remaining addresses keep provider order, duplicates
/// included.
pub async fn run_dns_lookup<T: HttpTransport + ?Sized>(
    transport: &T,
    config: &ReconConfig,
    hostname: &str,
) -> Result<DnsRecords, ScanError> {
    info!(hostname, "Starting DNS lookup.");

    let mut url = config.doh_endpoint.clone();
    url.query_pairs_mut().append_pair("name", hostname).append_pair("type", "A");

    let response = transport
        .get(HttpRequest::get(url).accept(DNS_JSON))
        .await
        .map_err(|e| ScanError::DnsLookup(e.to_string()))?;

    if !response.is_success() {
        warn!(hostname, status = %response.status, "DoH provider returned an error status.");
        return Err(ScanError::DnsLookup(response.status_text()));
    }

    let parsed: DohResponse = serde_json::from_str(&response.body).map_err(|e| {
        warn!(hostname, error = %e, "DoH response was not valid JSON.");
        ScanError::DnsLookup(format!("malformed DNS response: {e}"))
    })?;

    let addresses: Vec<String> = parsed
        .answer
        .unwrap_or_default()
        .into_iter()
        .filter(|a| a.record_type.is_none_or(|t| t == RECORD_TYPE_A))
        .map(|a| a.data)
        .collect();

    if addresses.is_empty() {
        debug!(hostname, "No A records in DoH answer.");
        return Ok(DnsRecords::NotFound);
    }

    info!(hostname, count = addresses.len(), "DNS lookup finished.");
    Ok(DnsRecords::Addresses(addresses))
}
