// src/core/scanner/robots_scanner.rs

use reqwest::StatusCode;
use tracing::{info, warn};
use url::Url;

use crate::core::models::{NormalizedTarget, RobotsPolicy};
use crate::core::transport::{HttpRequest, HttpTransport};

pub const ROBOTS_PATH: &str = "/robots.txt";

/// Fetches the target's crawler policy.
///
/// This step cannot fail the scan. Every outcome, including transport errors
/// for a host that does not resolve, is folded into a `RobotsPolicy`.
pub async fn run_robots_fetch<T: HttpTransport + ?Sized>(
    transport: &T,
    target: &NormalizedTarget,
) -> RobotsPolicy {
    let raw_url = format!("{}://{}{}", target.scheme, target.hostname, ROBOTS_PATH);
    info!(url = %raw_url, "Fetching robots.txt.");

    let url = match Url::parse(&raw_url) {
        Ok(url) => url,
        Err(e) => {
            warn!(url = %raw_url, error = %e, "Could not build robots.txt URL.");
            return RobotsPolicy::FetchError(format!("invalid URL: {e}"));
        }
    };

    match transport.get(HttpRequest::get(url)).await {
        Ok(response) if response.is_success() => {
            info!(bytes = response.body.len(), "robots.txt found.");
            RobotsPolicy::Found(response.body)
        }
        Ok(response) if response.status == StatusCode::NOT_FOUND => {
            info!("robots.txt not present on target.");
            RobotsPolicy::NotFound
        }
        Ok(response) => {
            warn!(status = %response.status, "robots.txt fetch returned an error status.");
            RobotsPolicy::FetchError(response.status_text())
        }
        Err(e) => {
            warn!(error = %e, "robots.txt fetch failed.");
            RobotsPolicy::FetchError(e.to_string())
        }
    }
}
