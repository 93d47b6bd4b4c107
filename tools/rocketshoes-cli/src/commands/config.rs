//! Configuration management commands.

use anyhow::{bail, Result};
use rocketshoes_cart::Concurrency;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{CliConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    match ctx.config.api.timeout_ms {
        Some(ms) => ctx.output.kv("timeout_ms", &ms.to_string()),
        None => ctx.output.kv("timeout_ms", "(none)"),
    }

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.storage_dir().display().to_string());
    ctx.output.kv("namespace", &ctx.config.storage.namespace);
    ctx.output.kv("key", &ctx.config.storage_key());

    ctx.output.info("");
    ctx.output.info("[cart]");
    ctx.output
        .kv("concurrency", concurrency_name(ctx.config.cart.concurrency));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    CliConfig::default().save(&config_path)?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn concurrency_name(concurrency: Concurrency) -> &'static str {
    match concurrency {
        Concurrency::LastCommitWins => "last-commit-wins",
        Concurrency::Optimistic => "optimistic",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrency_name_matches_config_spelling() {
        for concurrency in [Concurrency::LastCommitWins, Concurrency::Optimistic] {
            let json = serde_json::to_value(concurrency).unwrap();
            assert_eq!(json, concurrency_name(concurrency));
        }
    }
}
