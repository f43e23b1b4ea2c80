//! Response DTOs for operations.

use refscan_core::{ScanResult, ScanSummary};
use serde::{Deserialize, Serialize};

use crate::requests::ScanTarget;

/// Response from a scan operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResponse {
    /// What was scanned.
    pub target: ScanTarget,

    /// Context labels scanned, in scan order.
    pub contexts: Vec<String>,

    /// Findings in emission order.
    pub results: Vec<ScanResult>,

    /// Aggregate counts over `results`.
    pub summary: ScanSummary,
}

impl ScanResponse {
    /// Build a response and its summary.
    pub fn new(target: ScanTarget, contexts: Vec<String>, results: Vec<ScanResult>) -> Self {
        let summary = ScanSummary::from_results(&results);
        Self {
            target,
            contexts,
            results,
            summary,
        }
    }

    /// Number of findings.
    pub fn finding_count(&self) -> usize {
        self.results.len()
    }

    /// Whether the scan completed without findings.
    pub fn is_clean(&self) -> bool {
        self.results.is_empty()
    }

    /// Findings produced for one context label.
    pub fn results_for<'a>(&'a self, context: &'a str) -> impl Iterator<Item = &'a ScanResult> {
        self.results.iter().filter(move |r| r.context == context)
    }
}
