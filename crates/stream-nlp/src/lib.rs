//! # GlobalStream NLP
//!
//! Natural language understanding for the GlobalStream voice assistant.
//!
//! This crate turns a spoken command into an intent, a set of entities and a
//! sentiment score, remembers the previous turn for a short window, and
//! produces the assistant's spoken reply.
//!
//! ## Features
//!
//! - **Intent Classification**: Ranked trigger-phrase matching with capped confidence
//! - **Entity Extraction**: Genre, time period, rating, language and content type
//! - **Conversation Context**: Five-minute memory per session with sticky preferences
//! - **Response Generation**: Varied phrasings with an injectable random source
//!
//! ## Example
//!
//! ```rust
//! use stream_nlp::{ContextStore, NlpEngine, NlpEngineImpl};
//!
//! let engine = NlpEngineImpl::new();
//! let mut context = ContextStore::new();
//!
//! let result = engine.process("search for stranger things", &mut context);
//! assert_eq!(result.intent.name(), "search");
//! println!("{}", engine.generate_response(&result));
//! ```

pub mod action;
pub mod complex;
pub mod context;
pub mod engine;
pub mod entity;
pub mod error;
pub mod intent;
pub mod response;
pub mod sentiment;
pub mod vocabulary;

use serde::{Deserialize, Serialize};

pub use action::AssistantAction;
pub use complex::{ComplexQuery, ComplexQueryParser, COMPLEX_FALLBACK};
pub use context::{
    Clock, ContextStore, ConversationContext, ManualClock, SessionRegistry, SystemClock,
    DEFAULT_CONTEXT_TTL,
};
pub use engine::NlpEngineImpl;
pub use entity::{Entities, EntityCategory, EntityExtractor};
pub use error::{NlpError, Result};
pub use intent::{Intent, IntentClassifier, IntentType};
pub use response::{RandomSource, ResponseGenerator, SeededRandom, ThreadRandom};
pub use sentiment::SentimentScorer;

/// Everything understood about one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NlpResult {
    pub intent: Intent,
    pub entities: Entities,
    /// -1.0 (negative) to 1.0 (positive)
    pub sentiment: f64,
    /// Context as it stood right after this turn was recorded
    pub context: ConversationContext,
}

impl NlpResult {
    /// What the UI layer should do with this turn.
    pub fn action(&self) -> AssistantAction {
        AssistantAction::from_result(self)
    }
}

/// Main NLP engine trait.
///
/// The engine itself is stateless between calls; conversation state lives in
/// the [`ContextStore`] the caller passes in, one per session.
pub trait NlpEngine: Send + Sync {
    /// Classifies, extracts and scores `input`, then records the turn in `context`.
    ///
    /// Never fails: input matching nothing yields the `unknown` intent.
    fn process(&self, input: &str, context: &mut ContextStore) -> NlpResult;

    /// Produces the spoken reply for a processed utterance.
    fn generate_response(&self, result: &NlpResult) -> String;

    /// Forgets the conversation, e.g. when the assistant panel closes.
    fn reset_context(&self, context: &mut ContextStore) {
        context.reset();
    }
}
