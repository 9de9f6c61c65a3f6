//! Interactive assistant session

use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{BufRead, IsTerminal};
use stream_core::{AppConfig, AppError, SessionId};
use stream_nlp::{ContextStore, NlpEngine, NlpEngineImpl};
use tracing::debug;

use crate::commands::ask::print_details;

pub fn run(config: &AppConfig, initial_message: Option<String>) -> Result<()> {
    let engine = NlpEngineImpl::from_config(&config.nlp);
    let mut context = ContextStore::from_config(&config.nlp);
    let session = SessionId::new();

    println!(
        "{} assistant session {}",
        "Starting".green(),
        session.to_string().cyan()
    );
    println!("{}", "Type 'exit' or 'quit' to end the session.".dimmed());
    println!("{}", "Type '/help' for available commands.".dimmed());
    println!();

    if let Some(msg) = initial_message {
        respond(&engine, &mut context, &msg);
    }

    // dialoguer needs a terminal; piped sessions read plain lines until EOF
    let mut piped = if std::io::stdin().is_terminal() {
        None
    } else {
        Some(std::io::stdin().lock().lines())
    };

    loop {
        let input: String = match piped.as_mut() {
            Some(lines) => match lines.next() {
                Some(line) => line?,
                None => break,
            },
            None => Input::with_theme(&ColorfulTheme::default())
                .with_prompt("You")
                .allow_empty(true)
                .interact_text()?,
        };

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "exit" | "quit" | "/exit" | "/quit" => {
                engine.reset_context(&mut context);
                println!("{}", "Goodbye!".green());
                break;
            }
            "/help" => {
                print_help();
                continue;
            }
            "/reset" => {
                engine.reset_context(&mut context);
                println!("{}", "Conversation context cleared.".yellow());
                continue;
            }
            "/context" => {
                println!("{}", serde_json::to_string_pretty(&context.snapshot())?);
                continue;
            }
            _ => {}
        }

        respond(&engine, &mut context, input);
    }

    Ok(())
}

/// Answers one turn. A rejected utterance is reported and the session goes on.
fn respond(engine: &NlpEngineImpl, context: &mut ContextStore, message: &str) {
    let result = match engine.process_checked(message, context) {
        Ok(result) => result,
        Err(e) => {
            let err = AppError::from(e);
            debug!(error = %err, "Utterance rejected");
            eprintln!("{}: {}", "Error".red().bold(), err);
            return;
        }
    };
    let response = engine.generate_response(&result);

    println!();
    println!("{}: {}", "Assistant".cyan().bold(), response);
    print_details(&result, &result.action());
    println!();
}

fn print_help() {
    println!();
    println!("{}", "Available Commands:".yellow().bold());
    println!("  {}  - End the session", "/exit, /quit".cyan());
    println!("  {}         - Show this help message", "/help".cyan());
    println!("  {}        - Forget the conversation", "/reset".cyan());
    println!("  {}      - Show remembered context", "/context".cyan());
    println!();
    println!(
        "{}",
        "Try: 'go home', 'search for dune', 'recommend top comedy', 'play'".dimmed()
    );
    println!();
}
