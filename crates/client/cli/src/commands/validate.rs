//! Validate a build file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::{Context, read_build, rejected};
use crate::output::{self, OutputFormat};

/// Check point budgets and mastery caps of a build file
///
/// Exits with an error when the build is not valid.
#[derive(Parser, Debug)]
pub struct Validate {
    /// Path to a JSON build file
    #[arg(value_name = "BUILD")]
    build: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Validate {
    pub fn execute(self, context: &Context) -> Result<()> {
        let build = read_build(&self.build)?;
        let report = context
            .service()?
            .calculator()
            .validate(&build)
            .map_err(rejected)?;

        match self.format {
            OutputFormat::Summary => output::print_report(&report),
            OutputFormat::Json => output::print_json(&report)?,
        }

        if !report.valid {
            anyhow::bail!("{} has {} issue(s)", build.name, report.issues.len());
        }
        Ok(())
    }
}
