//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// ironcve -- CVE record normalization toolkit.
///
/// Use `ironcve <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "ironcve", version, about, long_about = None)]
pub struct Cli {
    /// Path to the ironcve.toml configuration file (defaults are used if missing).
    #[arg(short, long, default_value = "ironcve.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve reference URLs to their canonical repository URL.
    Repo(UrlArgs),

    /// Extract repository and commit from reference URLs.
    Commit(UrlArgs),

    /// Decompose a CPE 2.3 formatted string.
    Cpe(CpeArgs),

    /// Normalize version strings for comparison.
    Normalize(NormalizeArgs),

    /// Extract affected versions and fix commits from a CVE record file.
    Versions(VersionsArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- repo / commit ----

/// One or more reference URLs.
#[derive(Args, Debug)]
pub struct UrlArgs {
    /// Reference URLs to resolve.
    #[arg(required = true)]
    pub urls: Vec<String>,
}

// ---- cpe ----

/// A single CPE formatted string.
#[derive(Args, Debug)]
pub struct CpeArgs {
    /// CPE 2.3 formatted string (e.g. cpe:2.3:a:vendor:product:1.0:*:*:*:*:*:*:*).
    pub cpe: String,
}

// ---- normalize ----

/// Version strings to normalize.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Version strings (e.g. v2.3.1-rc1).
    #[arg(required = true)]
    pub versions: Vec<String>,
}

// ---- versions ----

/// Extract version ranges from an NVD JSON record or feed.
#[derive(Args, Debug)]
pub struct VersionsArgs {
    /// Path to a JSON file holding a single CVE item or a feed with `CVE_Items`.
    pub record: PathBuf,

    /// Ordered list of known versions, one per line (blank lines and `#` comments ignored).
    #[arg(long)]
    pub valid_versions: Option<PathBuf>,

    /// Disable the description-based fallback regardless of configuration.
    #[arg(long)]
    pub no_description_fallback: bool,
}

// ---- config ----

/// Manage ironcve configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, normalizer).
        #[arg(long)]
        section: Option<String>,
    },
}
