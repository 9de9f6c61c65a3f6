//! Intent classification module.
//!
//! Scores every trigger phrase of the intent catalogue by substring
//! containment and lexical overlap, keeping the single best candidate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, trace};

use crate::error::{NlpError, Result};
use crate::vocabulary::{INTENT_TEMPLATES, PLAY_TRIGGERS, SEARCH_TRIGGERS};

/// Slot name carrying the search query of a `search` intent.
pub const QUERY_SLOT: &str = "query";
/// Slot name carrying the title of a `playback.play` intent.
pub const TITLE_SLOT: &str = "title";

const BASE_CONFIDENCE: f64 = 0.6;
const OVERLAP_WEIGHT: f64 = 0.4;
const MAX_CONFIDENCE: f64 = 0.95;

/// Intents understood by the assistant.
///
/// Names are dot-namespaced (`navigation.home`, `playback.play`) and are what
/// downstream dispatch switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntentType {
    #[serde(rename = "navigation.home")]
    NavigationHome,
    #[serde(rename = "navigation.movies")]
    NavigationMovies,
    #[serde(rename = "navigation.shows")]
    NavigationShows,
    #[serde(rename = "navigation.mylist")]
    NavigationMyList,
    #[serde(rename = "navigation.profile")]
    NavigationProfile,
    #[serde(rename = "search")]
    Search,
    #[serde(rename = "playback.play")]
    PlaybackPlay,
    #[serde(rename = "playback.resume")]
    PlaybackResume,
    #[serde(rename = "recommendation")]
    Recommendation,
    #[serde(rename = "help")]
    Help,
    /// No trigger phrase matched
    #[serde(rename = "unknown")]
    Unknown,
}

impl IntentType {
    pub const ALL: [IntentType; 11] = [
        Self::NavigationHome,
        Self::NavigationMovies,
        Self::NavigationShows,
        Self::NavigationMyList,
        Self::NavigationProfile,
        Self::Search,
        Self::PlaybackPlay,
        Self::PlaybackResume,
        Self::Recommendation,
        Self::Help,
        Self::Unknown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::NavigationHome => "navigation.home",
            Self::NavigationMovies => "navigation.movies",
            Self::NavigationShows => "navigation.shows",
            Self::NavigationMyList => "navigation.mylist",
            Self::NavigationProfile => "navigation.profile",
            Self::Search => "search",
            Self::PlaybackPlay => "playback.play",
            Self::PlaybackResume => "playback.resume",
            Self::Recommendation => "recommendation",
            Self::Help => "help",
            Self::Unknown => "unknown",
        }
    }

    /// Returns a human-readable description of the intent type.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NavigationHome => "Go to the home page",
            Self::NavigationMovies => "Browse the movie catalogue",
            Self::NavigationShows => "Browse TV shows and series",
            Self::NavigationMyList => "Open the saved watchlist",
            Self::NavigationProfile => "Open profile and account settings",
            Self::Search => "Search the library for a title or topic",
            Self::PlaybackPlay => "Start playing a title",
            Self::PlaybackResume => "Resume the last unfinished title",
            Self::Recommendation => "Suggest something to watch",
            Self::Help => "Explain what the assistant can do",
            Self::Unknown => "Unknown or unclear intent",
        }
    }

    pub fn is_playback(&self) -> bool {
        self.name().starts_with("playback")
    }

    pub fn is_navigation(&self) -> bool {
        self.name().starts_with("navigation.")
    }
}

impl std::fmt::Display for IntentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IntentType {
    type Err = NlpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|intent| intent.name() == s)
            .ok_or_else(|| NlpError::validation(format!("Unknown intent name: {}", s)))
    }
}

/// Represents a classified intent with confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// The classified intent type
    #[serde(rename = "name")]
    pub intent_type: IntentType,
    /// Confidence score (0.0 to 0.95)
    pub confidence: f64,
    /// Intent-specific slots such as `query` or `title`
    #[serde(default)]
    pub entities: BTreeMap<String, String>,
}

impl Intent {
    pub fn new(intent_type: IntentType, confidence: f64) -> Self {
        Self {
            intent_type,
            confidence,
            entities: BTreeMap::new(),
        }
    }

    /// The "no match" classification.
    pub fn unknown() -> Self {
        Self::new(IntentType::Unknown, 0.0)
    }

    pub fn with_slot(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entities.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &'static str {
        self.intent_type.name()
    }

    pub fn slot(&self, key: &str) -> Option<&str> {
        self.entities.get(key).map(String::as_str)
    }

    pub fn query(&self) -> Option<&str> {
        self.slot(QUERY_SLOT)
    }

    pub fn title(&self) -> Option<&str> {
        self.slot(TITLE_SLOT)
    }

    pub fn is_unknown(&self) -> bool {
        self.intent_type == IntentType::Unknown
    }
}

/// A trigger phrase and the intent it votes for.
#[derive(Debug, Clone)]
struct IntentPattern {
    phrase: String,
    word_count: usize,
    intent: IntentType,
}

impl IntentPattern {
    fn new(phrase: &str, intent: IntentType) -> Self {
        Self {
            phrase: phrase.to_string(),
            word_count: word_count(phrase),
            intent,
        }
    }
}

/// Intent classifier that uses substring matching over the intent catalogue.
pub struct IntentClassifier {
    patterns: Vec<IntentPattern>,
}

impl IntentClassifier {
    pub fn new() -> Self {
        let patterns = INTENT_TEMPLATES
            .iter()
            .flat_map(|template| {
                template
                    .patterns
                    .iter()
                    .map(move |phrase| IntentPattern::new(phrase, template.intent))
            })
            .collect();

        Self { patterns }
    }

    /// Adds a custom trigger phrase, evaluated after every built-in phrase.
    ///
    /// # Arguments
    ///
    /// * `intent` - Intent the phrase votes for
    /// * `phrase` - Trigger phrase; matched case-insensitively
    pub fn add_custom_pattern(&mut self, intent: IntentType, phrase: &str) -> Result<()> {
        let phrase = phrase.trim().to_lowercase();
        if phrase.is_empty() {
            return Err(NlpError::invalid_pattern("Pattern cannot be empty"));
        }
        if intent == IntentType::Unknown {
            return Err(NlpError::invalid_pattern(
                "Patterns cannot target the unknown intent",
            ));
        }

        debug!(intent = %intent, phrase = %phrase, "Adding custom intent pattern");
        self.patterns.push(IntentPattern::new(&phrase, intent));
        Ok(())
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Classifies the intent of an utterance.
    ///
    /// Each matching phrase scores `0.6 + 0.4 * phrase_words / input_words`,
    /// capped at 0.95. Only a strictly higher score replaces the current best,
    /// so ties go to the phrase declared first.
    pub fn classify(&self, input: &str) -> Intent {
        let input = input.trim().to_lowercase();
        trace!("Classifying intent for input: {}", input);

        let input_words = word_count(&input);
        let mut best: Option<(&IntentPattern, f64)> = None;

        for pattern in &self.patterns {
            if !input.contains(pattern.phrase.as_str()) {
                continue;
            }

            let ratio = pattern.word_count as f64 / input_words.max(1) as f64;
            let confidence = (BASE_CONFIDENCE + ratio * OVERLAP_WEIGHT).min(MAX_CONFIDENCE);
            trace!(phrase = %pattern.phrase, confidence, "Pattern matched");

            if best.map_or(true, |(_, score)| confidence > score) {
                best = Some((pattern, confidence));
            }
        }

        let Some((pattern, confidence)) = best else {
            debug!("No patterns matched, returning Unknown intent");
            return Intent::unknown();
        };

        let mut intent = Intent::new(pattern.intent, confidence);
        match pattern.intent {
            IntentType::Search => {
                intent
                    .entities
                    .insert(QUERY_SLOT.to_string(), extract_after(&input, SEARCH_TRIGGERS));
            }
            IntentType::PlaybackPlay => {
                intent
                    .entities
                    .insert(TITLE_SLOT.to_string(), extract_after(&input, PLAY_TRIGGERS));
            }
            _ => {}
        }

        debug!(
            "Classified intent: {} with confidence: {:.2}",
            intent.intent_type, intent.confidence
        );

        intent
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Text following the first trigger (in list order) present in `input`.
///
/// When no trigger occurs the whole input is the slot value.
fn extract_after(input: &str, triggers: &[&str]) -> String {
    triggers
        .iter()
        .find_map(|trigger| {
            input
                .find(trigger)
                .map(|pos| input[pos + trigger.len()..].trim().to_string())
        })
        .unwrap_or_else(|| input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_navigation_home() {
        let classifier = IntentClassifier::new();
        let intent = classifier.classify("go home");
        assert_eq!(intent.intent_type, IntentType::NavigationHome);
        assert_eq!(intent.confidence, 0.95);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let classifier = IntentClassifier::new();
        let intent = classifier.classify("  Take Me HOME  ");
        assert_eq!(intent.intent_type, IntentType::NavigationHome);
    }

    #[test]
    fn test_classify_empty_is_unknown() {
        let classifier = IntentClassifier::new();
        let intent = classifier.classify("");
        assert_eq!(intent, Intent::unknown());
        assert_eq!(intent.confidence, 0.0);
        assert!(intent.entities.is_empty());
    }

    #[test]
    fn test_classify_unknown() {
        let classifier = IntentClassifier::new();
        let intent = classifier.classify("hello there");
        assert!(intent.is_unknown());
        assert_eq!(intent.name(), "unknown");
    }

    #[test]
    fn test_confidence_formula() {
        let classifier = IntentClassifier::new();
        // "recommend" is one word out of four: 0.6 + 0.25 * 0.4
        let intent = classifier.classify("please recommend something nice");
        assert_eq!(intent.intent_type, IntentType::Recommendation);
        assert!((intent.confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_drops_with_extra_words() {
        let classifier = IntentClassifier::new();
        let short = classifier.classify("settings");
        let long = classifier.classify("open the settings page right now");
        assert_eq!(short.intent_type, IntentType::NavigationProfile);
        assert_eq!(long.intent_type, IntentType::NavigationProfile);
        assert!(long.confidence < short.confidence);
    }

    #[test]
    fn test_tie_goes_to_earlier_template() {
        let classifier = IntentClassifier::new();
        // The longer phrase scores strictly higher and wins.
        assert_eq!(
            classifier.classify("my movies").intent_type,
            IntentType::NavigationMyList
        );
        // "home" and "start" tie at one word each; navigation.home is declared first.
        assert_eq!(
            classifier.classify("start home").intent_type,
            IntentType::NavigationHome
        );
    }

    #[test]
    fn test_search_query_extraction() {
        let classifier = IntentClassifier::new();
        let intent = classifier.classify("search for stranger things");
        assert_eq!(intent.intent_type, IntentType::Search);
        assert_eq!(intent.query(), Some("stranger things"));
    }

    #[test]
    fn test_search_without_shortlist_trigger_uses_whole_input() {
        let classifier = IntentClassifier::new();
        let intent = classifier.classify("look up");
        assert_eq!(intent.intent_type, IntentType::Search);
        assert_eq!(intent.query(), Some("look up"));
    }

    #[test]
    fn test_play_without_title() {
        let classifier = IntentClassifier::new();
        let intent = classifier.classify("play");
        assert_eq!(intent.intent_type, IntentType::PlaybackPlay);
        assert_eq!(intent.title(), Some(""));
    }

    #[test]
    fn test_play_title_extraction() {
        let classifier = IntentClassifier::new();
        let intent = classifier.classify("play the matrix");
        assert_eq!(intent.intent_type, IntentType::PlaybackPlay);
        assert_eq!(intent.title(), Some("the matrix"));
    }

    #[test]
    fn test_slot_keeps_repeated_trigger() {
        let classifier = IntentClassifier::new();
        let intent = classifier.classify("play the play");
        assert_eq!(intent.intent_type, IntentType::PlaybackPlay);
        assert_eq!(intent.title(), Some("the play"));
    }

    #[test]
    fn test_custom_pattern() {
        let mut classifier = IntentClassifier::new();
        let before = classifier.pattern_count();
        classifier
            .add_custom_pattern(IntentType::PlaybackResume, "Keep Going")
            .unwrap();
        assert_eq!(classifier.pattern_count(), before + 1);

        let intent = classifier.classify("keep going");
        assert_eq!(intent.intent_type, IntentType::PlaybackResume);
    }

    #[test]
    fn test_custom_pattern_rejects_empty() {
        let mut classifier = IntentClassifier::new();
        assert!(classifier.add_custom_pattern(IntentType::Help, "   ").is_err());
        assert!(classifier
            .add_custom_pattern(IntentType::Unknown, "anything")
            .is_err());
    }

    #[test]
    fn test_intent_name_round_trip() {
        for intent in IntentType::ALL {
            assert_eq!(intent.name().parse::<IntentType>().unwrap(), intent);
            assert!(!intent.description().is_empty());
        }
        assert!("navigation.nowhere".parse::<IntentType>().is_err());
    }

    #[test]
    fn test_intent_serializes_with_dotted_name() {
        let intent = Intent::new(IntentType::PlaybackPlay, 0.8).with_slot(TITLE_SLOT, "dune");
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["name"], "playback.play");
        assert_eq!(json["entities"]["title"], "dune");
    }

    #[test]
    fn test_playback_prefix() {
        assert!(IntentType::PlaybackPlay.is_playback());
        assert!(IntentType::PlaybackResume.is_playback());
        assert!(!IntentType::Search.is_playback());
        assert!(IntentType::NavigationHome.is_navigation());
    }
}
