// src/core/scanner/mod.rs

// This file acts as the public interface for the `scanner` module.
// Each lookup lives in its own sub-module; the orchestrator below chains them.
pub mod dns_scanner;
pub mod ipinfo_scanner;
pub mod robots_scanner;

use tracing::{error, info};

use crate::core::endpoints::ReconConfig;
use crate::core::errors::ScanError;
use crate::core::models::{ScanOutcome, ScanRequest, ScanResult, ScanStage};
use crate::core::normalizer::normalize;
use crate::core::transport::HttpTransport;
use self::dns_scanner::run_dns_lookup;
use self::ipinfo_scanner::run_ipinfo_lookup;
use self::robots_scanner::run_robots_fetch;

/// Receives every stage transition of a running scan.
pub trait ScanObserver: Send {
    fn on_stage(&mut self, stage: ScanStage);
}

impl<F: FnMut(ScanStage) + Send> ScanObserver for F {
    fn on_stage(&mut self, stage: ScanStage) {
        self(stage)
    }
}

/// Runs reconnaissance scans against a single transport and configuration.
///
/// The orchestrator holds no per-scan state: each call to [`Orchestrator::run`]
/// builds its own `ScanResult`, so concurrent scans on a shared orchestrator
/// never see each other's data.
pub struct Orchestrator<T: HttpTransport> {
    transport: T,
    config: ReconConfig,
}

impl<T: HttpTransport> Orchestrator<T> {
    pub fn new(transport: T, config: ReconConfig) -> Self {
        Self { transport, config }
    }

    /// Scans `raw_url` without progress reporting.
    pub async fn run_scan(&self, raw_url: &str) -> ScanOutcome {
        self.run(&ScanRequest::new(raw_url), &mut |_: ScanStage| {}).await
    }

    /// Executes the pipeline: normalize, resolve DNS, look up the first
    /// address, fetch robots.txt. The steps run strictly in that order.
    ///
    /// Normalization, DNS and IP info failures stop the pipeline; the fields
    /// gathered so far come back alongside the error and the rest stay
    /// `Skipped`. A robots.txt failure is recorded in the result and the scan
    /// still completes.
    pub async fn run(&self, request: &ScanRequest, observer: &mut dyn ScanObserver) -> ScanOutcome {
        info!(raw_url = %request.raw_url, crawl_depth = ?request.crawl_depth, "Starting scan.");

        observer.on_stage(ScanStage::Validating);
        let target = match normalize(&request.raw_url) {
            Ok(target) => target,
            Err(e) => {
                error!(error = %e, "Rejected scan input.");
                observer.on_stage(ScanStage::Failed);
                return ScanOutcome { result: None, error: Some(e) };
            }
        };
        let mut result = ScanResult::for_target(target.clone());

        observer.on_stage(ScanStage::ResolvingDns);
        match run_dns_lookup(&self.transport, &self.config, &target.hostname).await {
            Ok(records) => result.dns_records = records,
            Err(e) => return abort(result, e, ScanStage::ResolvingDns, observer),
        }

        observer.on_stage(ScanStage::ResolvingIpInfo);
        match run_ipinfo_lookup(&self.transport, &self.config, &result.dns_records).await {
            Ok(ip_info) => result.ip_info = ip_info,
            Err(e) => return abort(result, e, ScanStage::ResolvingIpInfo, observer),
        }

        observer.on_stage(ScanStage::FetchingRobots);
        result.robots_policy = run_robots_fetch(&self.transport, &target).await;

        observer.on_stage(ScanStage::Completed);
        info!(hostname = %target.hostname, "Scan completed.");
        ScanOutcome { result: Some(result), error: None }
    }
}

fn abort(
    result: ScanResult,
    error: ScanError,
    failed_at: ScanStage,
    observer: &mut dyn ScanObserver,
) -> ScanOutcome {
    debug_assert!(failed_at.can_fail(), "{failed_at} is not allowed to fail the scan");
    error!(stage = %failed_at, error = %error, "Scan aborted by a fatal step.");
    observer.on_stage(ScanStage::Failed);
    ScanOutcome { result: Some(result), error: Some(error) }
}
