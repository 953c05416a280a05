//! `ironcve versions` command handler
//!
//! Loads an NVD JSON record (single item or feed), runs the version extractor
//! on every item, and renders the ranges, fix commits and notes per CVE.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use ironcve_core::types::CveFeed;
use ironcve_normalizer::{NormalizerConfig, VersionExtractor, VersionInfo, cpes};

use crate::cli::VersionsArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `versions` command.
pub async fn execute(
    args: VersionsArgs,
    config: &NormalizerConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let json = tokio::fs::read_to_string(&args.record).await?;
    let source_name = args.record.display().to_string();
    let items = CveFeed::parse_items(&json, &source_name)
        .map_err(ironcve_core::error::IronCveError::from)?;

    let valid_versions = match &args.valid_versions {
        Some(path) => load_valid_versions(path).await?,
        None => Vec::new(),
    };

    let mut extractor = VersionExtractor::from_config(config);
    if args.no_description_fallback {
        extractor = extractor.with_description_fallback(false);
    }

    info!(
        source = %source_name,
        items = items.len(),
        valid_versions = valid_versions.len(),
        "extracting versions"
    );

    let records = items
        .iter()
        .map(|item| {
            let (versions, notes) = extractor.extract(item, &valid_versions);
            VersionsRecord {
                id: item.id().to_owned(),
                cpes: cpes(item).into_iter().map(str::to_owned).collect(),
                versions,
                notes,
            }
        })
        .collect();

    writer.render(&VersionsReport { records })
}

/// Read an ordered version list, one version per line.
async fn load_valid_versions(path: &Path) -> Result<Vec<String>, CliError> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(parse_valid_versions(&content))
}

fn parse_valid_versions(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

/// Extraction results for every item in the input file.
#[derive(Serialize)]
pub struct VersionsReport {
    pub records: Vec<VersionsRecord>,
}

/// Extraction result for a single CVE.
#[derive(Serialize)]
pub struct VersionsRecord {
    pub id: String,
    pub cpes: Vec<String>,
    pub versions: VersionInfo,
    pub notes: Vec<String>,
}

impl Render for VersionsReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                writeln!(w)?;
            }
            writeln!(w, "{}", record.id.bold())?;

            if !record.cpes.is_empty() {
                writeln!(w, "  {}", "CPEs:".bold())?;
                for cpe in &record.cpes {
                    writeln!(w, "    {}", cpe)?;
                }
            }

            writeln!(w, "  {}", "Affected versions:".bold())?;
            if record.versions.affected_versions.is_empty() {
                writeln!(w, "    {}", "(none)".dimmed())?;
            }
            for range in &record.versions.affected_versions {
                writeln!(w, "    {}", range.to_string().yellow())?;
            }

            if !record.versions.fix_commits.is_empty() {
                writeln!(w, "  {}", "Fix commits:".bold())?;
                for commit in &record.versions.fix_commits {
                    writeln!(w, "    {} {}", commit.repo, commit.commit.green())?;
                }
            }

            if !record.notes.is_empty() {
                writeln!(w, "  {}", "Notes:".bold())?;
                for note in &record.notes {
                    writeln!(w, "    {}", note.dimmed())?;
                }
            }
        }
        Ok(())
    }
}
