//! Show a stored character.

use anyhow::Result;
use clap::Parser;
use console::style;

use super::Context;
use crate::output::{self, OutputFormat};

/// Show a stored character
#[derive(Parser, Debug)]
pub struct Show {
    /// Character id
    #[arg(value_name = "ID")]
    id: String,

    /// Owner (defaults to CHARSHEET_OWNER)
    #[arg(short, long, value_name = "OWNER")]
    owner: Option<String>,

    /// Recalculate against the current rule content first
    #[arg(short, long)]
    refresh: bool,

    /// Print how every derived stat was reached
    #[arg(short, long)]
    breakdown: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Show {
    pub fn execute(self, context: &Context) -> Result<()> {
        let service = context.service()?;
        let owner = context.owner(&self.owner);

        let record = if self.refresh {
            service.refresh(owner, &self.id)?.map(|(record, changed)| {
                if changed {
                    eprintln!(
                        "{} Stats changed under the current rules and were re-saved",
                        style("!").yellow().bold()
                    );
                }
                record
            })
        } else {
            service.load(owner, &self.id)?
        };

        let Some(record) = record else {
            anyhow::bail!("No character '{}' stored for {}", self.id, owner);
        };

        match self.format {
            OutputFormat::Summary => {
                output::print_stats(&record.stats, self.breakdown);
                output::print_report(&record.report);
            }
            OutputFormat::Json => output::print_json(&record)?,
        }
        Ok(())
    }
}
