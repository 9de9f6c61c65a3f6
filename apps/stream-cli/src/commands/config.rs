//! Configuration inspection commands

use anyhow::{bail, Result};
use colored::Colorize;
use serde_json::Value;
use stream_core::AppConfig;

use crate::output::{self, OutputFormat};
use crate::ConfigCommands;

pub fn run(config: &AppConfig, cmd: &ConfigCommands, format: OutputFormat) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(config, format),
        ConfigCommands::Get { key } => get_config(config, key),
    }
}

fn show_config(config: &AppConfig, format: OutputFormat) -> Result<()> {
    if let Some(text) = output::format_structured(config, format)? {
        println!("{}", text);
        return Ok(());
    }

    output::section("nlp");
    output::key_value(
        "context_ttl_seconds",
        &config.nlp.context_ttl_seconds.to_string(),
    );
    output::key_value("max_input_chars", &config.nlp.max_input_chars.to_string());
    match config.nlp.response_seed {
        Some(seed) => output::key_value("response_seed", &seed.to_string()),
        None => output::key_value("response_seed", &"[random]".dimmed().to_string()),
    }

    output::section("logging");
    output::key_value("level", &config.logging.level);
    output::key_value("json", &config.logging.json.to_string());

    Ok(())
}

fn get_config(config: &AppConfig, key: &str) -> Result<()> {
    let value = lookup(config, key)?;
    match value {
        Value::String(s) => println!("{}", s),
        Value::Null => println!("{}", "[not set]".dimmed()),
        other => println!("{}", other),
    }
    Ok(())
}

/// Resolves a dotted key such as `nlp.context_ttl_seconds`.
fn lookup(config: &AppConfig, key: &str) -> Result<Value> {
    let tree = serde_json::to_value(config)?;
    let pointer = format!("/{}", key.replace('.', "/"));

    match tree.pointer(&pointer) {
        Some(value) => Ok(value.clone()),
        None => bail!("Unknown configuration key: {}", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_dotted_key() {
        let config = AppConfig::default();
        assert_eq!(
            lookup(&config, "nlp.context_ttl_seconds").unwrap(),
            Value::from(300)
        );
        assert_eq!(
            lookup(&config, "logging.level").unwrap(),
            Value::from("warn")
        );
    }

    #[test]
    fn test_lookup_unknown_key() {
        let config = AppConfig::default();
        assert!(lookup(&config, "nlp.nope").is_err());
    }
}
