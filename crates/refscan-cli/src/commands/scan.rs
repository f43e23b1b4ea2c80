//! Scan command implementation.
//!
//! Loads a project snapshot, runs the requested scan and hands the response
//! to a display: stdout, or a report file.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use refscan_ops::{
    OpsContext, OpsError, ProjectSnapshot, ReportFormat, ResultDisplay, ScanRequest,
    ScanResponse, WriterDisplay,
};
use tracing::info;

use crate::ReportArgs;

/// Execute a scan request against the snapshot at `snapshot_path`.
///
/// `scene` opens a different scene first, like switching scenes in an editor.
pub fn execute(
    ctx: &OpsContext,
    snapshot_path: &Path,
    scene: Option<&str>,
    request: &ScanRequest,
    report: &ReportArgs,
) -> Result<ScanResponse> {
    let mut project = ProjectSnapshot::load(snapshot_path)
        .with_context(|| format!("Failed to load snapshot {}", snapshot_path.display()))?;

    if let Some(scene) = scene {
        project.open_scene(scene)?;
    }

    info!(project = %project.name, scan = %request.target, "Starting scan");
    let response = match ctx.scan(&project, request) {
        Ok(response) => response,
        Err(err) => {
            let corrupt =
                matches!(&err, OpsError::Scan(scan_err) if scan_err.is_inconsistent_graph());
            let err = anyhow::Error::new(err);
            if corrupt {
                return Err(err.context(format!(
                    "Snapshot {} has a corrupt object hierarchy",
                    snapshot_path.display()
                )));
            }
            return Err(err);
        }
    };

    let format = report.format.unwrap_or(ctx.config.default_format);

    match &report.output {
        Some(output_path) => {
            let file = File::create(output_path)
                .with_context(|| format!("Failed to create {}", output_path.display()))?;
            WriterDisplay::new(BufWriter::new(file), format).display(&response)?;

            println!("🔍 Scanned: {}", response.contexts.join(", "));
            print_summary(&response);
            println!("💾 Saved report to: {}", output_path.display());
        }
        None => {
            let stdout = std::io::stdout();
            WriterDisplay::new(stdout.lock(), format).display(&response)?;
            if format == ReportFormat::Json {
                println!();
            }
        }
    }

    Ok(response)
}

fn print_summary(response: &ScanResponse) {
    if response.is_clean() {
        println!("✅ No missing references found");
        return;
    }

    let summary = &response.summary;
    println!("⚠️  {} findings on {} objects", summary.total(), summary.affected_objects);
    println!("   Missing components:  {}", summary.missing_components);
    println!("   Missing references:  {}", summary.dangling_references);
    if summary.empty_references > 0 {
        println!("   Empty references:    {}", summary.empty_references);
    }
}
