//! # GlobalStream Core
//!
//! Shared configuration, error type and identifiers for the GlobalStream
//! voice assistant crates.

pub mod config;
pub mod error;
pub mod types;

pub use self::config::*;
pub use self::error::*;
pub use self::types::*;
