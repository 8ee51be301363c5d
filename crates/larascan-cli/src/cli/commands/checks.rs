//! `larascan checks` - List the built-in checks.

use anyhow::Result;
use colored::Colorize;
use larascan::{Category, Registry};
use serde::Serialize;

use super::Context;
use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
struct CheckEntry<'a> {
    category: Category,
    name: &'a str,
}

pub async fn execute(ctx: Context) -> Result<()> {
    let registry = Registry::builtin(&ctx.config.transport(None, None))?;
    let entries: Vec<CheckEntry<'_>> = registry
        .iter()
        .map(|(category, check)| CheckEntry {
            category,
            name: check.name(),
        })
        .collect();

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&entries)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
            for entry in &entries {
                writer.serialize(entry)?;
            }
            writer.flush()?;
        }
        OutputFormat::Pretty => {
            for category in registry.categories() {
                println!("{}", category.as_str().bold());
                for check in registry.checks(category) {
                    println!("  {}", check.name());
                }
                println!();
            }
            println!(
                "{}",
                format!("Total: {} checks", registry.len()).dimmed()
            );
        }
    }

    Ok(())
}
