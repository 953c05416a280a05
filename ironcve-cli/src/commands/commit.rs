//! `ironcve commit` command handler

use std::io::Write;

use serde::Serialize;

use ironcve_normalizer::{GitCommit, NormalizerConfig, NormalizerError, RepoResolver, commit};

use crate::cli::UrlArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `commit` command.
pub fn execute(
    args: UrlArgs,
    config: &NormalizerConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let resolver = RepoResolver::from_config(config);
    let report = build_report(&resolver, &args.urls);

    writer.render(&report)?;

    let failed = report.results.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        return Err(CliError::Command(format!(
            "{failed} of {} urls did not yield a commit",
            report.results.len()
        )));
    }
    Ok(())
}

fn extract(resolver: &RepoResolver, url: &str) -> Result<GitCommit, NormalizerError> {
    let repo = resolver.resolve(url)?;
    let commit = commit(url)?;
    Ok(GitCommit { repo, commit })
}

fn build_report(resolver: &RepoResolver, urls: &[String]) -> CommitReport {
    let results = urls
        .iter()
        .map(|url| match extract(resolver, url) {
            Ok(found) => CommitResult {
                url: url.clone(),
                repo: Some(found.repo),
                commit: Some(found.commit),
                error: None,
            },
            Err(e) => CommitResult {
                url: url.clone(),
                repo: None,
                commit: None,
                error: Some(e.to_string()),
            },
        })
        .collect();
    CommitReport { results }
}

/// Commit extraction report.
#[derive(Serialize)]
pub struct CommitReport {
    pub results: Vec<CommitResult>,
}

/// Extraction result for a single URL.
#[derive(Serialize)]
pub struct CommitResult {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Render for CommitReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for result in &self.results {
            writeln!(w, "{}", result.url.bold())?;
            if let (Some(repo), Some(commit)) = (&result.repo, &result.commit) {
                writeln!(w, "  repo:   {}", repo)?;
                writeln!(w, "  commit: {}", commit.green())?;
            }
            if let Some(err) = &result.error {
                writeln!(w, "  {}", err.red())?;
            }
        }
        Ok(())
    }
}
