//! Configuration management commands.

use anyhow::{Result, bail};
use quire_config::QuireConfig;

/// Show the merged configuration.
pub fn show(config: &QuireConfig, format: &str) -> Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        "toml" => {
            println!("{}", config.to_toml()?);
        }
        "text" => {
            println!("Quire Configuration");
            println!("===================\n");

            println!("Logging:");
            println!("  Level: {}", config.logging.level);
            println!("  JSON: {}", config.logging.json);
            println!();

            println!("Catalog:");
            println!(
                "  Seed: {}",
                config
                    .catalog
                    .seed
                    .as_ref()
                    .map_or("(bootstrap)".to_string(), |p| p.display().to_string())
            );
            println!();

            println!("Output:");
            println!("  Format: {:?}", config.output.format);
        }
        other => bail!("Unknown format '{other}' (expected text, json, or toml)"),
    }

    Ok(())
}
