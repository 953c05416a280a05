//! `ironcve repo` command handler

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use ironcve_normalizer::{NormalizerConfig, RepoResolver};

use crate::cli::UrlArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `repo` command.
///
/// Every URL is resolved independently; failures are reported per URL and
/// turn the exit code non-zero once all results are printed.
pub fn execute(
    args: UrlArgs,
    config: &NormalizerConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let resolver = RepoResolver::from_config(config);
    let report = build_report(&resolver, &args.urls);

    writer.render(&report)?;

    let failed = report.failed();
    if failed > 0 {
        return Err(CliError::Command(format!(
            "{failed} of {} urls could not be resolved",
            report.results.len()
        )));
    }
    Ok(())
}

fn build_report(resolver: &RepoResolver, urls: &[String]) -> RepoReport {
    let results = urls
        .iter()
        .map(|url| match resolver.resolve(url) {
            Ok(repo) => RepoResult {
                url: url.clone(),
                repo: Some(repo),
                error: None,
            },
            Err(e) => {
                debug!(url = %url, error = %e, "repository resolution failed");
                RepoResult {
                    url: url.clone(),
                    repo: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();
    RepoReport { results }
}

/// Repository resolution report.
#[derive(Serialize)]
pub struct RepoReport {
    pub results: Vec<RepoResult>,
}

impl RepoReport {
    fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }
}

/// Resolution result for a single URL.
#[derive(Serialize)]
pub struct RepoResult {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Render for RepoReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for result in &self.results {
            match (&result.repo, &result.error) {
                (Some(repo), _) => writeln!(w, "{} {}", result.url, repo.green())?,
                (None, Some(err)) => writeln!(w, "{} {}", result.url, err.red())?,
                (None, None) => writeln!(w, "{}", result.url)?,
            }
        }
        Ok(())
    }
}
