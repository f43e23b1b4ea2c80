//! Scan findings and the capability contract hosts use to act on them.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// Why a finding was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingReason {
    /// The component's backing type could not be resolved.
    MissingComponent,
    /// A reference field lost the object it was assigned to.
    DanglingReference,
    /// A reference field is empty; only reported when explicitly requested.
    EmptyReference,
}

impl FindingReason {
    /// Get a display label for the reason.
    pub fn label(&self) -> &'static str {
        match self {
            FindingReason::MissingComponent => "Missing component",
            FindingReason::DanglingReference => "Missing reference",
            FindingReason::EmptyReference => "Empty reference",
        }
    }
}

impl fmt::Display for FindingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One finding produced by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Name of the object carrying the defect.
    pub object_name: String,
    /// `/`-joined path from the hierarchy root down to the object.
    pub full_path: String,
    /// Label of the scan invocation that produced the finding.
    pub context: String,
    /// Kind of defect.
    pub reason: FindingReason,
    /// Offending field, empty for missing components.
    #[serde(default)]
    pub field_name: String,
}

impl ScanResult {
    /// Ask the host to bring this object into view.
    ///
    /// The host may need to switch its working context first, e.g. open the
    /// scene named by [`ScanResult::context`].
    pub fn focus<N: Navigator + ?Sized>(&self, navigator: &mut N) -> CoreResult<()> {
        navigator.focus(&self.context, &self.full_path)
    }
}

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.context, self.full_path, self.reason)?;
        if !self.field_name.is_empty() {
            write!(f, " ({})", self.field_name)?;
        }
        Ok(())
    }
}

/// Host capability for navigating to the object behind a finding.
pub trait Navigator {
    /// Bring the object at `full_path` within `context` into view.
    fn focus(&mut self, context: &str, full_path: &str) -> CoreResult<()>;
}

/// Aggregate counts over a list of findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Number of missing components.
    pub missing_components: usize,
    /// Number of dangling reference fields.
    pub dangling_references: usize,
    /// Number of empty reference fields (opt-in mode only).
    pub empty_references: usize,
    /// Distinct objects with at least one finding.
    pub affected_objects: usize,
    /// Findings per context label.
    pub by_context: BTreeMap<String, usize>,
}

impl ScanSummary {
    /// Summarize a list of findings.
    pub fn from_results(results: &[ScanResult]) -> Self {
        let mut summary = Self::default();
        let mut objects = HashSet::new();

        for result in results {
            match result.reason {
                FindingReason::MissingComponent => summary.missing_components += 1,
                FindingReason::DanglingReference => summary.dangling_references += 1,
                FindingReason::EmptyReference => summary.empty_references += 1,
            }
            objects.insert((result.context.as_str(), result.full_path.as_str()));
            *summary.by_context.entry(result.context.clone()).or_default() += 1;
        }

        summary.affected_objects = objects.len();
        summary
    }

    /// Total number of findings.
    pub fn total(&self) -> usize {
        self.missing_components + self.dangling_references + self.empty_references
    }

    /// Whether the scan found nothing.
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}
