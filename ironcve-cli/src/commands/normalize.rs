//! `ironcve normalize` command handler

use std::io::Write;

use serde::Serialize;

use ironcve_normalizer::normalize_version;

use crate::cli::NormalizeArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `normalize` command.
pub fn execute(args: NormalizeArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let report = build_report(&args.versions);
    writer.render(&report)?;

    let failed = report.results.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        return Err(CliError::Command(format!(
            "{failed} of {} versions could not be normalized",
            report.results.len()
        )));
    }
    Ok(())
}

fn build_report(versions: &[String]) -> NormalizeReport {
    let results = versions
        .iter()
        .map(|version| match normalize_version(version) {
            Ok(normalized) => NormalizeResult {
                version: version.clone(),
                normalized: Some(normalized),
                error: None,
            },
            Err(e) => NormalizeResult {
                version: version.clone(),
                normalized: None,
                error: Some(e.to_string()),
            },
        })
        .collect();
    NormalizeReport { results }
}

/// Version normalization report.
#[derive(Serialize)]
pub struct NormalizeReport {
    pub results: Vec<NormalizeResult>,
}

#[derive(Serialize)]
pub struct NormalizeResult {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Render for NormalizeReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for result in &self.results {
            match (&result.normalized, &result.error) {
                (Some(normalized), _) => {
                    writeln!(w, "{} {}", result.version, normalized.green())?
                }
                (None, Some(err)) => writeln!(w, "{} {}", result.version, err.red())?,
                (None, None) => writeln!(w, "{}", result.version)?,
            }
        }
        Ok(())
    }
}
