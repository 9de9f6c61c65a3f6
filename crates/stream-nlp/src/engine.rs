//! NLP Engine implementation.
//!
//! This module provides the engine that runs one assistant turn: intent
//! classification, entity extraction, sentiment scoring and the context
//! update, followed on request by response generation.

use stream_core::{NlpConfig, SessionId};
use tracing::{debug, info, instrument};

use crate::complex::{ComplexQuery, ComplexQueryParser};
use crate::context::{ContextStore, SessionRegistry};
use crate::entity::EntityExtractor;
use crate::error::{NlpError, Result};
use crate::intent::IntentClassifier;
use crate::response::{RandomSource, ResponseGenerator};
use crate::sentiment::SentimentScorer;
use crate::{NlpEngine, NlpResult};

/// Implementation of the NLP engine.
pub struct NlpEngineImpl {
    intent_classifier: IntentClassifier,
    entity_extractor: EntityExtractor,
    sentiment_scorer: SentimentScorer,
    response_generator: ResponseGenerator,
    complex_parser: ComplexQueryParser,
    max_input_chars: usize,
}

impl NlpEngineImpl {
    /// Creates a new NLP engine with default configuration.
    pub fn new() -> Self {
        Self::from_config(&NlpConfig::default())
    }

    /// Creates an engine honouring the input limit and response seed of `config`.
    pub fn from_config(config: &NlpConfig) -> Self {
        info!("Initializing NLP engine");

        let response_generator = match config.response_seed {
            Some(seed) => {
                debug!(seed, "Using seeded response selection");
                ResponseGenerator::seeded(seed)
            }
            None => ResponseGenerator::new(),
        };

        Self {
            intent_classifier: IntentClassifier::new(),
            entity_extractor: EntityExtractor::new(),
            sentiment_scorer: SentimentScorer::new(),
            response_generator,
            complex_parser: ComplexQueryParser::new(),
            max_input_chars: config.max_input_chars,
        }
    }

    /// Replaces the random source used to pick response phrasings.
    pub fn with_random(mut self, random: Box<dyn RandomSource>) -> Self {
        self.response_generator = ResponseGenerator::with_random(random);
        self
    }

    pub fn classifier_mut(&mut self) -> &mut IntentClassifier {
        &mut self.intent_classifier
    }

    pub fn response_generator(&self) -> &ResponseGenerator {
        &self.response_generator
    }

    /// Like [`NlpEngine::process`], but rejects overlong input first.
    pub fn process_checked(&self, input: &str, context: &mut ContextStore) -> Result<NlpResult> {
        self.validate_input(input)?;
        Ok(self.process(input, context))
    }

    /// Processes a turn against the session's own context.
    pub fn process_session(
        &self,
        registry: &SessionRegistry,
        session: SessionId,
        input: &str,
    ) -> NlpResult {
        registry.with_store(session, |store| self.process(input, store))
    }

    /// Recognises structured requests that need a dedicated lookup.
    pub fn parse_complex(&self, input: &str) -> Option<ComplexQuery> {
        self.complex_parser.parse(input)
    }

    fn validate_input(&self, input: &str) -> Result<()> {
        let chars = input.chars().count();
        if chars > self.max_input_chars {
            return Err(NlpError::validation(format!(
                "Input is too long ({} characters, max {})",
                chars, self.max_input_chars
            )));
        }
        Ok(())
    }

    fn normalize(input: &str) -> String {
        input.trim().to_lowercase()
    }
}

impl Default for NlpEngineImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl NlpEngine for NlpEngineImpl {
    #[instrument(skip(self, input, context), fields(input_len = input.len()))]
    fn process(&self, input: &str, context: &mut ContextStore) -> NlpResult {
        let normalized = Self::normalize(input);

        let intent = self.intent_classifier.classify(&normalized);
        let entities = self.entity_extractor.extract(&normalized);
        let sentiment = self.sentiment_scorer.score(&normalized);

        context.update(&intent, &entities);

        info!(
            "Processed utterance: {} (confidence: {:.2}, entities: {})",
            intent.intent_type,
            intent.confidence,
            entities.len()
        );

        NlpResult {
            intent,
            entities,
            sentiment,
            context: context.snapshot(),
        }
    }

    fn generate_response(&self, result: &NlpResult) -> String {
        self.response_generator.generate(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityCategory;
    use crate::intent::IntentType;
    use crate::response::MockRandomSource;

    #[test]
    fn test_process_fills_every_part() {
        let engine = NlpEngineImpl::new();
        let mut context = ContextStore::new();
        let result = engine.process("I love action movies", &mut context);

        assert_eq!(result.intent.intent_type, IntentType::NavigationMovies);
        assert_eq!(result.entities[&EntityCategory::Genre], "action");
        assert!(result.sentiment > 0.0);
        assert_eq!(result.context.last_intent, Some(IntentType::NavigationMovies));
    }

    #[test]
    fn test_process_empty_input() {
        let engine = NlpEngineImpl::new();
        let mut context = ContextStore::new();
        let result = engine.process("", &mut context);

        assert!(result.intent.is_unknown());
        assert!(result.entities.is_empty());
        assert_eq!(result.sentiment, 0.0);
        assert_eq!(result.context.last_intent, Some(IntentType::Unknown));
    }

    #[test]
    fn test_process_checked_rejects_long_input() {
        let engine = NlpEngineImpl::from_config(&NlpConfig::new().with_max_input_chars(10));
        let mut context = ContextStore::new();

        assert!(engine.process_checked("go home", &mut context).is_ok());
        let err = engine
            .process_checked("take me to the landing page", &mut context)
            .unwrap_err();
        assert!(matches!(err, NlpError::Validation(_)));
    }

    #[test]
    fn test_reset_context() {
        let engine = NlpEngineImpl::new();
        let mut context = ContextStore::new();
        engine.process("search for comedy", &mut context);
        assert!(!context.snapshot().is_empty());

        engine.reset_context(&mut context);
        assert!(context.snapshot().is_empty());
    }

    #[test]
    fn test_custom_pattern_through_engine() {
        let mut engine = NlpEngineImpl::new();
        engine
            .classifier_mut()
            .add_custom_pattern(IntentType::NavigationMyList, "queue")
            .unwrap();
        let mut context = ContextStore::new();
        let result = engine.process("open my queue", &mut context);
        assert_eq!(result.intent.intent_type, IntentType::NavigationMyList);
    }

    #[test]
    fn test_seeded_engine_is_reproducible() {
        let config = NlpConfig::new().with_response_seed(3);
        let first = NlpEngineImpl::from_config(&config);
        let second = NlpEngineImpl::from_config(&config);
        let mut context = ContextStore::new();

        let result = first.process("show movies", &mut context);
        assert_eq!(first.generate_response(&result), second.generate_response(&result));
    }

    #[test]
    fn test_injected_random_source() {
        let mut random = MockRandomSource::new();
        random.expect_pick().times(1).return_const(3usize);
        let engine = NlpEngineImpl::new().with_random(Box::new(random));
        let mut context = ContextStore::new();

        let result = engine.process("play the office", &mut context);
        assert_eq!(engine.generate_response(&result), "Enjoy watching \"the office\"");
    }
}
