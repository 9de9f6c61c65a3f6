//! Entity extraction module.
//!
//! Each category scans its vocabulary in declaration order and keeps the
//! first phrase found in the input. Categories never influence each other.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

use crate::vocabulary::entity_vocabulary;

/// Entity categories recognised in utterances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Genre,
    TimePeriod,
    Rating,
    Language,
    ContentType,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 5] = [
        Self::Genre,
        Self::TimePeriod,
        Self::Rating,
        Self::Language,
        Self::ContentType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Genre => "genre",
            Self::TimePeriod => "time_period",
            Self::Rating => "rating",
            Self::Language => "language",
            Self::ContentType => "content_type",
        }
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracted entities, one value per category at most.
pub type Entities = BTreeMap<EntityCategory, String>;

/// Extracts genre, period, rating, language and content-type mentions.
pub struct EntityExtractor {
    vocabularies: Vec<(EntityCategory, Vec<String>)>,
}

impl EntityExtractor {
    pub fn new() -> Self {
        let vocabularies = EntityCategory::ALL
            .into_iter()
            .map(|category| {
                let phrases = entity_vocabulary(category)
                    .iter()
                    .map(|phrase| phrase.to_string())
                    .collect();
                (category, phrases)
            })
            .collect();

        Self { vocabularies }
    }

    /// Appends phrases to a category, after its built-in vocabulary.
    ///
    /// Useful for catalogue-specific genres or languages. Blank phrases are
    /// ignored.
    pub fn extend_vocabulary<I, S>(&mut self, category: EntityCategory, phrases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some((_, vocabulary)) = self.vocabularies.iter_mut().find(|(c, _)| *c == category) {
            vocabulary.extend(
                phrases
                    .into_iter()
                    .map(|p| p.as_ref().trim().to_lowercase())
                    .filter(|p| !p.is_empty()),
            );
        }
    }

    /// Extracts entities from an utterance.
    pub fn extract(&self, input: &str) -> Entities {
        let input = input.to_lowercase();
        let mut entities = Entities::new();

        for (category, vocabulary) in &self.vocabularies {
            if let Some(phrase) = vocabulary.iter().find(|phrase| input.contains(phrase.as_str())) {
                trace!(category = %category, phrase = %phrase, "Entity matched");
                entities.insert(*category, phrase.clone());
            }
        }

        entities
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_genre() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract("i love action movies");
        assert_eq!(entities.get(&EntityCategory::Genre).map(String::as_str), Some("action"));
        assert_eq!(
            entities.get(&EntityCategory::ContentType).map(String::as_str),
            Some("movie")
        );
    }

    #[test]
    fn test_extract_nothing() {
        let extractor = EntityExtractor::new();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("go home").is_empty());
    }

    #[test]
    fn test_first_declared_phrase_wins() {
        let extractor = EntityExtractor::new();
        // "science fiction" precedes "sci-fi" in the genre table
        let entities = extractor.extract("sci-fi or science fiction");
        assert_eq!(entities[&EntityCategory::Genre], "science fiction");

        // "top" precedes "highest rated" even when the latter is more specific
        let entities = extractor.extract("highest rated top picks");
        assert_eq!(entities[&EntityCategory::Rating], "top");
    }

    #[test]
    fn test_categories_are_independent() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract("best new korean horror documentary");
        assert_eq!(entities[&EntityCategory::Genre], "documentary");
        assert_eq!(entities[&EntityCategory::TimePeriod], "new");
        assert_eq!(entities[&EntityCategory::Rating], "best");
        assert_eq!(entities[&EntityCategory::Language], "korean");
        assert_eq!(entities[&EntityCategory::ContentType], "documentary");
    }

    #[test]
    fn test_extract_is_case_insensitive_and_pure() {
        let extractor = EntityExtractor::new();
        let first = extractor.extract("Classic French DRAMA");
        let second = extractor.extract("Classic French DRAMA");
        assert_eq!(first, second);
        assert_eq!(first[&EntityCategory::Genre], "drama");
        assert_eq!(first[&EntityCategory::Language], "french");
        assert_eq!(first[&EntityCategory::TimePeriod], "classic");
    }

    #[test]
    fn test_extend_vocabulary() {
        let mut extractor = EntityExtractor::new();
        extractor.extend_vocabulary(EntityCategory::Language, ["Hindi", "  "]);
        let entities = extractor.extract("something in hindi");
        assert_eq!(entities[&EntityCategory::Language], "hindi");
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let mut entities = Entities::new();
        entities.insert(EntityCategory::TimePeriod, "90s".to_string());
        let json = serde_json::to_string(&entities).unwrap();
        assert_eq!(json, r#"{"time_period":"90s"}"#);
    }
}
