//! Rendering helpers shared by the commands

use colored::Colorize;
use serde::Serialize;

/// How command results are rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!("Unsupported output format '{}'", other)),
        }
    }
}

/// Serialize for the structured formats; `None` for text, which each
/// command renders itself.
pub fn format_structured<T: Serialize>(
    value: &T,
    format: OutputFormat,
) -> anyhow::Result<Option<String>> {
    match format {
        OutputFormat::Text => Ok(None),
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
        OutputFormat::Yaml => Ok(Some(serde_yaml::to_string(value)?)),
    }
}

/// Indented `key: value` line under a reply.
pub fn key_value(key: &str, value: &str) {
    println!("  {}: {}", key.bold(), value);
}

pub fn dimmed(message: &str) {
    println!("{}", message.dimmed());
}

/// Blank line, then an underlined heading.
pub fn section(title: &str) {
    println!();
    println!("{}", title.bold().underline());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_text_is_not_structured() {
        assert!(format_structured(&1, OutputFormat::Text).unwrap().is_none());
        assert_eq!(
            format_structured(&vec![1, 2], OutputFormat::Json).unwrap().as_deref(),
            Some("[\n  1,\n  2\n]")
        );
    }
}
