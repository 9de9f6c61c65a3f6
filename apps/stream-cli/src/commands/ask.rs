//! Single utterance command

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use stream_core::{AppConfig, AppError};
use stream_nlp::{
    AssistantAction, ComplexQuery, ContextStore, NlpEngine, NlpEngineImpl, NlpResult,
    COMPLEX_FALLBACK,
};
use tracing::debug;

use crate::output::{self, OutputFormat};

#[derive(Serialize)]
struct AskOutput<'a> {
    response: String,
    action: AssistantAction,
    result: &'a NlpResult,
}

#[derive(Serialize)]
struct AdvancedOutput {
    response: String,
    query: Option<ComplexQuery>,
}

pub fn run(
    config: &AppConfig,
    utterance: &str,
    advanced: bool,
    format: OutputFormat,
) -> Result<()> {
    let engine = NlpEngineImpl::from_config(&config.nlp);

    if advanced {
        return run_advanced(&engine, utterance, format);
    }

    let mut context = ContextStore::from_config(&config.nlp);
    let result = engine
        .process_checked(utterance, &mut context)
        .map_err(AppError::from)?;
    let response = engine.generate_response(&result);
    debug!(
        intent = %result.intent.name(),
        confidence = result.intent.confidence,
        "Utterance processed"
    );

    let out = AskOutput {
        response,
        action: result.action(),
        result: &result,
    };

    if let Some(text) = output::format_structured(&out, format)? {
        println!("{}", text);
        return Ok(());
    }

    println!("{}: {}", "Assistant".cyan().bold(), out.response);
    print_details(&result, &out.action);
    Ok(())
}

fn run_advanced(engine: &NlpEngineImpl, utterance: &str, format: OutputFormat) -> Result<()> {
    let query = engine.parse_complex(utterance);
    debug!(matched = query.is_some(), "Complex query parsed");
    let response = query
        .as_ref()
        .map(ComplexQuery::message)
        .unwrap_or_else(|| COMPLEX_FALLBACK.to_string());

    let out = AdvancedOutput { response, query };

    if let Some(text) = output::format_structured(&out, format)? {
        println!("{}", text);
        return Ok(());
    }

    println!("{}: {}", "Assistant".cyan().bold(), out.response);
    if let Some(query) = &out.query {
        output::key_value("query", &serde_json::to_string(query)?);
    }
    Ok(())
}

pub(crate) fn print_details(result: &NlpResult, action: &AssistantAction) {
    output::key_value(
        "intent",
        &format!("{} ({:.2})", result.intent.name(), result.intent.confidence),
    );

    for (slot, value) in &result.intent.entities {
        output::key_value(slot, value);
    }

    if !result.entities.is_empty() {
        let entities = result
            .entities
            .iter()
            .map(|(category, value)| format!("{}={}", category, value))
            .collect::<Vec<_>>()
            .join(", ");
        output::key_value("entities", &entities);
    }

    output::key_value("sentiment", &format!("{:+.1}", result.sentiment));

    match action.route() {
        Some(route) => output::key_value("route", route),
        None => output::dimmed("  (no navigation)"),
    }
}
