//! ironcve CLI -- command-line front end for CVE record normalization
//!
//! Every subcommand builds a report and hands it to [`output::OutputWriter`],
//! so `--output json` works uniformly. Errors map to exit codes via
//! [`error::CliError::exit_code`].

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use colored::Colorize;

use ironcve_core::config::{GeneralConfig, IronCveConfig};
use ironcve_normalizer::NormalizerConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let writer = OutputWriter::new(cli.output);

    if let Err(e) = run(cli, &writer).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli, writer: &OutputWriter) -> Result<(), CliError> {
    // config 명령은 설정 파일 자체를 검사하므로 미리 로드하지 않음
    let command = match cli.command {
        Commands::Config(args) => {
            init_logging(GeneralConfig::default(), cli.log_level.as_deref())?;
            return commands::config::execute(args, &cli.config, writer).await;
        }
        command => command,
    };

    let config = IronCveConfig::load_or_default(&cli.config).await?;
    init_logging(config.general.clone(), cli.log_level.as_deref())?;

    let normalizer = NormalizerConfig::from_core(&config.normalizer);
    normalizer.validate()?;

    tracing::debug!(config = %cli.config.display(), "ironcve starting");

    match command {
        Commands::Repo(args) => commands::repo::execute(args, &normalizer, writer),
        Commands::Commit(args) => commands::commit::execute(args, &normalizer, writer),
        Commands::Cpe(args) => commands::cpe::execute(args, writer),
        Commands::Normalize(args) => commands::normalize::execute(args, writer),
        Commands::Versions(args) => commands::versions::execute(args, &normalizer, writer).await,
        Commands::Config(_) => unreachable!(),
    }
}

/// Apply the `--log-level` override and install the tracing subscriber.
fn init_logging(mut general: GeneralConfig, log_level: Option<&str>) -> Result<(), CliError> {
    if let Some(level) = log_level {
        if !VALID_LOG_LEVELS.contains(&level) {
            return Err(CliError::Config(format!(
                "invalid log level '{level}' (expected: {})",
                VALID_LOG_LEVELS.join(", ")
            )));
        }
        general.log_level = level.to_owned();
    }
    logging::init_tracing(&general).map_err(|e| CliError::Config(e.to_string()))
}
