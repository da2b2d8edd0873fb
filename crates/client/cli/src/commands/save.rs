//! Calculate and store a build.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use super::{Context, read_build};
use crate::output;

/// Calculate a build and store it
#[derive(Parser, Debug)]
pub struct Save {
    /// Path to a JSON build file
    #[arg(value_name = "BUILD")]
    build: PathBuf,

    /// Character id (defaults to a slug of the character name)
    #[arg(long, value_name = "ID")]
    id: Option<String>,

    /// Owner to store under (defaults to CHARSHEET_OWNER)
    #[arg(short, long, value_name = "OWNER")]
    owner: Option<String>,
}

impl Save {
    pub fn execute(self, context: &Context) -> Result<()> {
        let build = read_build(&self.build)?;
        let service = context.service()?;
        let record = service.save(context.owner(&self.owner), self.id.as_deref(), build)?;

        println!(
            "{} Saved {} ({})",
            style("✓").green().bold(),
            style(&record.key).cyan(),
            &record.digest[..12]
        );
        if !record.report.valid {
            output::print_report(&record.report);
        }
        Ok(())
    }
}
