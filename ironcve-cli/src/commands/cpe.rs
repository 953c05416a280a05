//! `ironcve cpe` command handler

use std::io::Write;

use serde::Serialize;

use ironcve_normalizer::{Cpe, parse_cpe};

use crate::cli::CpeArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `cpe` command.
pub fn execute(args: CpeArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let cpe = parse_cpe(&args.cpe)?;
    writer.render(&CpeReport {
        formatted: args.cpe,
        cpe,
    })
}

/// Decomposed CPE report.
#[derive(Serialize)]
pub struct CpeReport {
    pub formatted: String,
    #[serde(flatten)]
    pub cpe: Cpe,
}

impl Render for CpeReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let cpe = &self.cpe;
        writeln!(w, "{}", self.formatted.bold())?;
        for (name, value) in [
            ("cpe_version", &cpe.cpe_version),
            ("part", &cpe.part),
            ("vendor", &cpe.vendor),
            ("product", &cpe.product),
            ("version", &cpe.version),
            ("update", &cpe.update),
            ("edition", &cpe.edition),
            ("language", &cpe.language),
            ("sw_edition", &cpe.sw_edition),
            ("target_sw", &cpe.target_sw),
            ("target_hw", &cpe.target_hw),
            ("other", &cpe.other),
        ] {
            writeln!(w, "  {:<12} {}", format!("{name}:"), value)?;
        }
        Ok(())
    }
}
