//! `larascan config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::{Config, DEFAULT_LOG_LEVEL, DEFAULT_THREADS};
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(&ctx, &key, &value),
        ConfigCommands::Path => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(config)?);
        }
        _ => {
            println!("{}", "Current Configuration:".bold());
            println!();

            let or_default = |value: Option<String>, default: &str| {
                value.unwrap_or_else(|| format!("{} {}", default, "(default)".dimmed()))
            };

            println!(
                "  {} {}",
                "threads:".bold(),
                or_default(config.threads.map(|t| t.to_string()), &DEFAULT_THREADS.to_string())
            );
            println!(
                "  {} {}",
                "timeout_secs:".bold(),
                or_default(
                    config.timeout_secs.map(|t| t.to_string()),
                    &larascan::DEFAULT_TIMEOUT.as_secs().to_string()
                )
            );
            println!(
                "  {} {}",
                "user_agent:".bold(),
                or_default(config.user_agent.clone(), larascan::DEFAULT_USER_AGENT)
            );
            println!(
                "  {} {}",
                "rate_limit:".bold(),
                config
                    .rate_limit
                    .map_or_else(|| "(unlimited)".dimmed().to_string(), |r| format!("{r}/s"))
            );
            println!(
                "  {} {}",
                "output_format:".bold(),
                or_default(
                    config.output_format.map(|f| f.to_string()),
                    &OutputFormat::default().to_string()
                )
            );
            println!(
                "  {} {}",
                "log_level:".bold(),
                or_default(config.log_level.clone(), DEFAULT_LOG_LEVEL)
            );
            println!();
            println!("{}", ctx.config_path.display().to_string().dimmed());
        }
    }

    Ok(())
}

fn set_config(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load(&ctx.config_path)?;
    config.set(key, value)?;
    config.save(&ctx.config_path)?;

    println!("{} {} set to {}.", "Success:".green().bold(), key, value.cyan());

    Ok(())
}
