//! Static vocabulary tables.
//!
//! Every matcher in this crate walks these tables in declaration order, so
//! reordering entries changes classification results.

use crate::entity::EntityCategory;
use crate::intent::IntentType;

/// Trigger phrases for one intent.
#[derive(Debug, Clone, Copy)]
pub struct IntentTemplate {
    pub intent: IntentType,
    pub patterns: &'static [&'static str],
}

pub static INTENT_TEMPLATES: &[IntentTemplate] = &[
    IntentTemplate {
        intent: IntentType::NavigationHome,
        patterns: &[
            "home",
            "go home",
            "take me home",
            "main page",
            "landing page",
            "start page",
        ],
    },
    IntentTemplate {
        intent: IntentType::NavigationMovies,
        patterns: &[
            "movies",
            "show movies",
            "film",
            "films",
            "movie page",
            "all movies",
            "browse movies",
        ],
    },
    IntentTemplate {
        intent: IntentType::NavigationShows,
        patterns: &[
            "shows",
            "tv shows",
            "series",
            "tv series",
            "television",
            "show series",
            "browse shows",
        ],
    },
    IntentTemplate {
        intent: IntentType::NavigationMyList,
        patterns: &[
            "my list",
            "watchlist",
            "saved",
            "favorites",
            "my movies",
            "my shows",
            "saved content",
        ],
    },
    IntentTemplate {
        intent: IntentType::NavigationProfile,
        patterns: &[
            "profile",
            "my profile",
            "account",
            "my account",
            "settings",
            "preferences",
        ],
    },
    IntentTemplate {
        intent: IntentType::Search,
        patterns: &[
            "search",
            "find",
            "look for",
            "search for",
            "find me",
            "look up",
            "query",
        ],
    },
    IntentTemplate {
        intent: IntentType::PlaybackPlay,
        patterns: &[
            "play",
            "watch",
            "start",
            "stream",
            "view",
            "show me",
            "begin",
        ],
    },
    IntentTemplate {
        intent: IntentType::PlaybackResume,
        patterns: &[
            "resume",
            "continue",
            "continue watching",
            "pick up",
            "where i left off",
            "unfinished",
        ],
    },
    IntentTemplate {
        intent: IntentType::Recommendation,
        patterns: &[
            "recommend",
            "suggestion",
            "what should i watch",
            "suggest",
            "recommend me",
            "good movie",
            "good show",
        ],
    },
    IntentTemplate {
        intent: IntentType::Help,
        patterns: &[
            "help",
            "what can you do",
            "commands",
            "how to use",
            "instructions",
            "guide me",
            "assist me",
        ],
    },
];

/// Phrases that introduce a search query, checked in this order.
pub static SEARCH_TRIGGERS: &[&str] = &["search for", "find", "look for", "search"];

/// Phrases that introduce a title to play, checked in this order.
pub static PLAY_TRIGGERS: &[&str] = &["play", "watch", "start", "stream"];

pub static GENRES: &[&str] = &[
    "action",
    "adventure",
    "animation",
    "comedy",
    "crime",
    "documentary",
    "drama",
    "family",
    "fantasy",
    "history",
    "horror",
    "music",
    "mystery",
    "romance",
    "science fiction",
    "sci-fi",
    "thriller",
    "war",
    "western",
];

pub static TIME_PERIODS: &[&str] = &[
    "new", "latest", "recent", "old", "classic", "90s", "80s", "70s", "2000s", "2010s", "2020s",
];

pub static RATINGS: &[&str] = &[
    "top",
    "best",
    "highest rated",
    "popular",
    "trending",
    "acclaimed",
];

pub static LANGUAGES: &[&str] = &[
    "english", "spanish", "french", "german", "japanese", "korean", "chinese",
];

pub static CONTENT_TYPES: &[&str] = &["movie", "show", "series", "documentary", "film", "tv show"];

pub static POSITIVE_WORDS: &[&str] = &[
    "good", "great", "awesome", "excellent", "amazing", "love", "like", "enjoy", "best",
];

pub static NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "worst", "hate", "dislike", "boring", "stupid", "waste",
];

/// Built-in vocabulary for an entity category.
pub fn entity_vocabulary(category: EntityCategory) -> &'static [&'static str] {
    match category {
        EntityCategory::Genre => GENRES,
        EntityCategory::TimePeriod => TIME_PERIODS,
        EntityCategory::Rating => RATINGS,
        EntityCategory::Language => LANGUAGES,
        EntityCategory::ContentType => CONTENT_TYPES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_intent_names_unique() {
        let names: HashSet<&str> = INTENT_TEMPLATES.iter().map(|t| t.intent.name()).collect();
        assert_eq!(names.len(), INTENT_TEMPLATES.len());
    }

    #[test]
    fn test_templates_have_lowercase_patterns() {
        for template in INTENT_TEMPLATES {
            assert!(
                !template.patterns.is_empty(),
                "{} has no patterns",
                template.intent
            );
            for pattern in template.patterns {
                assert_eq!(*pattern, pattern.to_lowercase());
                assert_eq!(*pattern, pattern.trim());
            }
        }
    }

    #[test]
    fn test_every_category_has_vocabulary() {
        for category in EntityCategory::ALL {
            assert!(!entity_vocabulary(category).is_empty());
        }
    }
}
