//! Intent catalogue command

use anyhow::Result;
use serde::Serialize;
use stream_nlp::vocabulary::INTENT_TEMPLATES;
use stream_nlp::IntentType;
use tabled::{Table, Tabled};

use crate::output::{self, OutputFormat};

#[derive(Serialize)]
struct IntentInfo {
    name: &'static str,
    description: &'static str,
    patterns: Vec<&'static str>,
}

fn catalogue() -> Vec<IntentInfo> {
    IntentType::ALL
        .iter()
        .filter(|intent| **intent != IntentType::Unknown)
        .map(|intent| IntentInfo {
            name: intent.name(),
            description: intent.description(),
            patterns: INTENT_TEMPLATES
                .iter()
                .filter(|template| template.intent == *intent)
                .flat_map(|template| template.patterns.iter().copied())
                .collect(),
        })
        .collect()
}

pub fn run(format: OutputFormat) -> Result<()> {
    let intents = catalogue();

    if let Some(text) = output::format_structured(&intents, format)? {
        println!("{}", text);
        return Ok(());
    }

    #[derive(Tabled)]
    struct IntentRow {
        #[tabled(rename = "Intent")]
        name: &'static str,
        #[tabled(rename = "Description")]
        description: &'static str,
        #[tabled(rename = "Trigger phrases")]
        patterns: String,
    }

    let rows: Vec<IntentRow> = intents
        .iter()
        .map(|info| IntentRow {
            name: info.name,
            description: info.description,
            patterns: info.patterns.join(", "),
        })
        .collect();

    output::section("Supported intents");
    println!("{}", Table::new(rows));
    Ok(())
}
