//! Config command implementation.
//!
//! Manages CLI configuration.

use anyhow::Result;
use refscan_ops::Config;

/// Show current configuration.
pub fn show(config: &Config) -> Result<()> {
    println!("refscan Configuration");
    println!("{:-<40}", "");

    println!(
        "Report empty references: {}",
        config.report_empty_references
    );
    println!("Default format:          {}", config.default_format);
    println!("Asset prefix:            {}", config.asset_prefix);

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Set a configuration value.
pub fn set(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let key = normalize_key(key);
    if let Err(err) = config.set(&key, value) {
        anyhow::bail!(
            "{}. Valid keys: {}",
            err,
            Config::keys().join(", ").replace('_', "-")
        );
    }

    config.save()?;
    println!("Set {} to: {}", key.replace('_', "-"), value);
    Ok(())
}

/// Get a configuration value.
pub fn get(config: &Config, key: &str) -> Result<()> {
    let Some(value) = config.get(&normalize_key(key)) else {
        anyhow::bail!("Unknown config key: {}", key);
    };

    println!("{}", value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults");
    Ok(())
}

/// Accept `asset-prefix` as well as `asset_prefix`.
fn normalize_key(key: &str) -> String {
    match key {
        "format" => "default_format".to_string(),
        "prefix" => "asset_prefix".to_string(),
        other => other.replace('-', "_"),
    }
}
