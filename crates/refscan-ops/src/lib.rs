//! refscan Operations Layer
//!
//! This crate turns the core reference scanner into named scan invocations
//! over a host environment. It can be embedded by the CLI or by an editor
//! integration.
//!
//! ## Architecture
//!
//! - **HostEnumerator**: the host decides which objects make up a context
//! - **Requests**: typed input DTOs selecting what to scan
//! - **Responses**: findings plus a summary
//! - **OpsContext**: executes requests against a host
//! - **ResultDisplay**: presentation of responses
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use refscan_ops::{OpsContext, ProjectSnapshot, ReportFormat, ReportRenderer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = OpsContext::default_config()?;
//!     let project = ProjectSnapshot::load(Path::new("project.json"))?;
//!
//!     let response = ctx.scan_all_contexts(&project)?;
//!     print!("{}", ReportRenderer::new(ReportFormat::Markdown).render(&response)?);
//!     Ok(())
//! }
//! ```

mod config;
mod context;
mod error;
mod host;
mod report;
mod requests;
mod responses;
mod snapshot;

// Re-export public API
pub use config::Config;
pub use context::OpsContext;
pub use error::{OpsError, OpsResult};
pub use host::{Enumeration, HostEnumerator, PROJECT_CONTEXT};
pub use report::{ReportFormat, ReportRenderer, ResultDisplay, WriterDisplay};
pub use requests::*;
pub use responses::*;
pub use snapshot::{
    AssetEntry, AssetLibrary, ProjectSnapshot, SceneSnapshot, SnapshotError, SnapshotNavigator,
};
