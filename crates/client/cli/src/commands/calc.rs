//! Calculate a build without storing it.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::{Context, read_build, rejected};
use crate::output::{self, OutputFormat};

/// Calculate the stat sheet of a build file
#[derive(Parser, Debug)]
pub struct Calc {
    /// Path to a JSON build file
    #[arg(value_name = "BUILD")]
    build: PathBuf,

    /// Print how every derived stat was reached
    #[arg(short, long)]
    breakdown: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Calc {
    pub fn execute(self, context: &Context) -> Result<()> {
        let build = read_build(&self.build)?;
        let service = context.service()?;
        let stats = service.calculator().calculate(&build).map_err(rejected)?;

        match self.format {
            OutputFormat::Summary => output::print_stats(&stats, self.breakdown),
            OutputFormat::Json => output::print_json(&stats)?,
        }
        Ok(())
    }
}
