//! CLI command implementations

pub mod ask;
pub mod chat;
pub mod completions;
pub mod config;
pub mod intents;
