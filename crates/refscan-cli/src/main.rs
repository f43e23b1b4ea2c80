//! refscan CLI - Find missing components and dangling references.
//!
//! Scans a JSON project snapshot: the open scene, every scene, or the asset
//! library under a path prefix.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use refscan_ops::{Config, OpsContext, ReportFormat, ScanRequest};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;

use commands::{config as config_cmd, scan};

/// refscan - Find missing references in scenes and assets.
#[derive(Parser, Debug)]
#[command(
    name = "refscan",
    author,
    version,
    about = "refscan: find missing components and dangling object references",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan the scene currently open in the project.
    Scene {
        /// Path to the project snapshot (JSON).
        snapshot: PathBuf,

        /// Open this scene before scanning.
        #[arg(short, long)]
        scene: Option<String>,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Scan every scene of the project.
    All {
        /// Path to the project snapshot (JSON).
        snapshot: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Scan project assets under a path prefix.
    Assets {
        /// Path to the project snapshot (JSON).
        snapshot: PathBuf,

        /// Asset path prefix (defaults to the configured asset prefix).
        #[arg(short, long)]
        prefix: Option<String>,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Report options shared by all scan commands.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Output format: md (markdown) or json.
    #[arg(short, long)]
    pub format: Option<ReportFormat>,

    /// Write the report to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also report reference fields that were never assigned.
    #[arg(long)]
    pub report_empty_references: bool,
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Get a configuration value.
    Get {
        /// Configuration key.
        key: String,
    },

    /// Reset configuration to defaults.
    Reset,

    /// Show path to config file.
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    match cli.command {
        Commands::Scene {
            snapshot,
            scene,
            report,
        } => {
            let ctx = OpsContext::new(Config::load()?);
            let request = with_report_flags(ScanRequest::current_context(), &report);
            scan::execute(&ctx, &snapshot, scene.as_deref(), &request, &report)?;
        }

        Commands::All { snapshot, report } => {
            let ctx = OpsContext::new(Config::load()?);
            let request = with_report_flags(ScanRequest::all_contexts(), &report);
            scan::execute(&ctx, &snapshot, None, &request, &report)?;
        }

        Commands::Assets {
            snapshot,
            prefix,
            report,
        } => {
            let config = Config::load()?;
            let prefix = prefix.unwrap_or_else(|| config.asset_prefix.clone());
            let ctx = OpsContext::new(config);
            let request = with_report_flags(ScanRequest::asset_collection(prefix), &report);
            scan::execute(&ctx, &snapshot, None, &request, &report)?;
        }

        // `reset` and `path` must keep working when the stored config is unreadable.
        Commands::Config(config_cmd_inner) => match config_cmd_inner {
            ConfigCommands::Show => {
                config_cmd::show(&Config::load()?)?;
            }
            ConfigCommands::Set { key, value } => {
                config_cmd::set(&mut Config::load()?, &key, &value)?;
            }
            ConfigCommands::Get { key } => {
                config_cmd::get(&Config::load()?, &key)?;
            }
            ConfigCommands::Reset => {
                config_cmd::reset()?;
            }
            ConfigCommands::Path => {
                if let Some(path) = Config::config_file_path() {
                    println!("{}", path.display());
                } else {
                    println!("(no config file path available)");
                }
            }
        },
    }

    Ok(())
}

fn with_report_flags(request: ScanRequest, report: &ReportArgs) -> ScanRequest {
    if report.report_empty_references {
        request.with_empty_references()
    } else {
        request
    }
}
