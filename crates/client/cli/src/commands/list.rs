//! List stored characters.

use anyhow::Result;
use clap::Parser;
use console::style;

use super::Context;
use crate::output::{self, OutputFormat};

/// List stored characters
#[derive(Parser, Debug)]
pub struct List {
    /// Owner to list (defaults to CHARSHEET_OWNER)
    #[arg(short, long, value_name = "OWNER")]
    owner: Option<String>,

    /// Only characters with this name (case-insensitive)
    #[arg(short, long, value_name = "NAME")]
    name: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl List {
    pub fn execute(self, context: &Context) -> Result<()> {
        let service = context.service()?;
        let owner = context.owner(&self.owner);
        let records = match &self.name {
            Some(name) => service.find_by_name(owner, name)?,
            None => service.list(owner)?,
        };

        if let OutputFormat::Json = self.format {
            return output::print_json(&records);
        }

        if records.is_empty() {
            println!("No characters stored for {}", style(owner).cyan());
            return Ok(());
        }

        for record in &records {
            let status = if record.report.valid {
                style("valid").green()
            } else {
                style("invalid").red()
            };
            println!(
                "{:<24} {:<20} L{:<2} {:<12} {}",
                style(&record.key.id).cyan(),
                record.build.name,
                record.stats.level,
                record.stats.class_name.as_deref().unwrap_or(&record.stats.class_id),
                status
            );
        }
        Ok(())
    }
}
