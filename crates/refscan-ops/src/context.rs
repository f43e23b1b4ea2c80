//! OpsContext - The main service for executing scans.
//!
//! The OpsContext holds configuration and turns each invocation into the
//! right host enumeration call followed by a reference scan.

use refscan_core::{ReferenceScanner, ScanOptions, ScanResult};
use tracing::info;

use crate::config::Config;
use crate::error::{OpsError, OpsResult};
use crate::host::{Enumeration, HostEnumerator};
use crate::requests::{ScanRequest, ScanTarget};
use crate::responses::ScanResponse;

/// The main operations context.
#[derive(Debug, Clone, Default)]
pub struct OpsContext {
    /// Configuration for operations.
    pub config: Config,
}

impl OpsContext {
    /// Create a new OpsContext with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Create a new OpsContext with configuration loaded from disk and environment.
    pub fn default_config() -> OpsResult<Self> {
        Ok(Self::new(Config::load()?))
    }

    /// Execute a scan request against a host.
    pub fn scan<H: HostEnumerator>(
        &self,
        host: &H,
        request: &ScanRequest,
    ) -> OpsResult<ScanResponse> {
        let options = ScanOptions {
            report_empty_references: request
                .report_empty_references
                .unwrap_or(self.config.report_empty_references),
        };

        let enumerations = match &request.target {
            ScanTarget::CurrentContext => {
                vec![host.active_context().map_err(OpsError::Host)?]
            }
            ScanTarget::AllContexts => host.all_contexts().map_err(OpsError::Host)?,
            ScanTarget::AssetCollection { path_prefix } => {
                vec![host.assets(path_prefix).map_err(OpsError::Host)?]
            }
        };

        let mut contexts = Vec::with_capacity(enumerations.len());
        let mut results = Vec::new();
        for enumeration in &enumerations {
            results.extend(scan_enumeration(host, enumeration, options)?);
            contexts.push(enumeration.label.clone());
        }

        let response = ScanResponse::new(request.target.clone(), contexts, results);
        info!(
            scan = %response.target,
            contexts = response.contexts.len(),
            findings = response.finding_count(),
            "Scan complete"
        );
        Ok(response)
    }

    /// Scan every object of the context currently open in the host.
    pub fn scan_current_context<H: HostEnumerator>(&self, host: &H) -> OpsResult<ScanResponse> {
        self.scan(host, &ScanRequest::current_context())
    }

    /// Scan every context the host knows about, concatenating results in host order.
    pub fn scan_all_contexts<H: HostEnumerator>(&self, host: &H) -> OpsResult<ScanResponse> {
        self.scan(host, &ScanRequest::all_contexts())
    }

    /// Scan project assets whose path starts with `path_prefix`.
    pub fn scan_asset_collection<H: HostEnumerator>(
        &self,
        host: &H,
        path_prefix: &str,
    ) -> OpsResult<ScanResponse> {
        self.scan(host, &ScanRequest::asset_collection(path_prefix))
    }
}

fn scan_enumeration<H: HostEnumerator>(
    host: &H,
    enumeration: &Enumeration<'_, H::Graph>,
    options: ScanOptions,
) -> OpsResult<Vec<ScanResult>> {
    info!(
        context = %enumeration.label,
        roots = enumeration.roots.len(),
        "Scanning context"
    );
    let results = ReferenceScanner::new(enumeration.graph, host.introspector())
        .with_options(options)
        .scan(&enumeration.label, &enumeration.roots)?;
    Ok(results)
}
