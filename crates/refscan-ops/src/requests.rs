//! Request DTOs for operations.
//!
//! Each request encapsulates everything needed for a scan invocation, so it
//! can be issued from the CLI, an editor integration, or programmatically.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which set of objects a scan covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum ScanTarget {
    /// The context currently open in the host.
    CurrentContext,
    /// Every context the host knows about.
    AllContexts,
    /// Project assets under a path prefix.
    AssetCollection {
        /// Asset path prefix; empty matches every asset.
        path_prefix: String,
    },
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanTarget::CurrentContext => write!(f, "current scene"),
            ScanTarget::AllContexts => write!(f, "all scenes"),
            ScanTarget::AssetCollection { path_prefix } if path_prefix.is_empty() => {
                write!(f, "all assets")
            }
            ScanTarget::AssetCollection { path_prefix } => {
                write!(f, "assets under {}", path_prefix)
            }
        }
    }
}

/// Request to scan for missing references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// What to scan.
    #[serde(flatten)]
    pub target: ScanTarget,

    /// Override the configured empty-reference reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_empty_references: Option<bool>,
}

impl ScanRequest {
    /// Scan the context currently open in the host.
    pub fn current_context() -> Self {
        Self::new(ScanTarget::CurrentContext)
    }

    /// Scan every context.
    pub fn all_contexts() -> Self {
        Self::new(ScanTarget::AllContexts)
    }

    /// Scan project assets under `path_prefix`.
    pub fn asset_collection(path_prefix: impl Into<String>) -> Self {
        Self::new(ScanTarget::AssetCollection {
            path_prefix: path_prefix.into(),
        })
    }

    fn new(target: ScanTarget) -> Self {
        Self {
            target,
            report_empty_references: None,
        }
    }

    /// Also report reference fields that were never assigned.
    pub fn with_empty_references(mut self) -> Self {
        self.report_empty_references = Some(true);
        self
    }
}
