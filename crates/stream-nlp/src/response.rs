//! Spoken response generation.
//!
//! Each intent maps to a small table of phrasings; one is chosen through a
//! [`RandomSource`] so callers can make the choice deterministic.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::entity::EntityCategory;
use crate::intent::IntentType;
use crate::NlpResult;

pub const HELP_RESPONSE: &str =
    "I can help you navigate GlobalStream. Try saying: 'go home', 'show movies', 'search for action', 'play Stranger Things', 'recommend comedy', or 'open my list'";
pub const FALLBACK_RESPONSE: &str =
    "I'm not sure how to help with that. Try asking for movies, TV shows, or search for a title.";
pub const SEARCH_PROMPT: &str = "What would you like to search for?";
pub const PLAY_PROMPT: &str = "What would you like to watch?";
pub const RECOMMENDATION_RESPONSE: &str = "Here are some recommendations for you";

/// Picks an index into a candidate list.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Returns a value in `0..len`; `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// Thread-local RNG; the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible selection from a fixed seed.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&self, len: usize) -> usize {
        self.rng.lock().gen_range(0..len)
    }
}

/// Builds the assistant's reply for a processed utterance.
pub struct ResponseGenerator {
    random: Box<dyn RandomSource>,
}

impl ResponseGenerator {
    pub fn new() -> Self {
        Self::with_random(Box::new(ThreadRandom))
    }

    pub fn with_random(random: Box<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_random(Box::new(SeededRandom::new(seed)))
    }

    /// Every reply `generate` could produce for `result`.
    ///
    /// Sentiment and context are currently ignored.
    pub fn candidates(&self, result: &NlpResult) -> Vec<String> {
        let intent = &result.intent;
        let entities = &result.entities;

        match intent.intent_type {
            IntentType::NavigationHome => owned(&[
                "Taking you to the home page",
                "Going to the home page now",
                "Navigating to the main page",
                "Home page coming right up",
            ]),
            IntentType::NavigationMovies => owned(&[
                "Here are all the movies",
                "Taking you to the movies section",
                "Showing you our movie collection",
                "Let's check out some movies",
            ]),
            IntentType::NavigationShows => owned(&[
                "Here are all the TV shows",
                "Taking you to the shows section",
                "Showing you our TV series collection",
                "Let's find you a great show to watch",
            ]),
            IntentType::NavigationMyList => owned(&[
                "Here's your watchlist",
                "Opening your saved content",
                "Here are the titles you've saved",
                "Your personal collection is ready",
            ]),
            IntentType::NavigationProfile => owned(&[
                "Opening your profile",
                "Here are your account settings",
                "Taking you to your profile page",
                "Your profile information is ready",
            ]),
            IntentType::Search => match intent.query().filter(|q| !q.is_empty()) {
                Some(query) => vec![
                    format!("Searching for \"{}\"", query),
                    format!("Looking up \"{}\" for you", query),
                    format!("Finding results for \"{}\"", query),
                    format!("Searching our library for \"{}\"", query),
                ],
                None => owned(&[SEARCH_PROMPT]),
            },
            IntentType::PlaybackPlay => match intent.title().filter(|t| !t.is_empty()) {
                Some(title) => vec![
                    format!("Playing \"{}\"", title),
                    format!("Starting \"{}\" for you", title),
                    format!("Now playing \"{}\"", title),
                    format!("Enjoy watching \"{}\"", title),
                ],
                None => owned(&[PLAY_PROMPT]),
            },
            IntentType::PlaybackResume => owned(&[
                "Picking up where you left off",
                "Continuing your last watch",
                "Resuming your content",
                "Let's continue what you were watching",
            ]),
            IntentType::Recommendation => {
                let genre = entities.get(&EntityCategory::Genre);
                let rating = entities.get(&EntityCategory::Rating);

                // a rating only changes the phrasing when a genre is present too
                match (genre, rating) {
                    (Some(genre), Some(rating)) => vec![
                        format!("Here are the {} {} titles", rating, genre),
                        format!("I found some {} {} content for you", rating, genre),
                        format!("You'll love these {} {} picks", rating, genre),
                    ],
                    (Some(genre), None) => vec![
                        format!("Here are some great {} options for you", genre),
                        format!("I think you'll enjoy these {} titles", genre),
                        format!("Check out these {} recommendations", genre),
                        format!("Based on your interest in {}, you might like these", genre),
                    ],
                    (None, _) => owned(&[RECOMMENDATION_RESPONSE]),
                }
            }
            IntentType::Help => owned(&[HELP_RESPONSE]),
            IntentType::Unknown => owned(&[FALLBACK_RESPONSE]),
        }
    }

    pub fn generate(&self, result: &NlpResult) -> String {
        let mut candidates = self.candidates(result);
        let index = match candidates.len() {
            0 => return FALLBACK_RESPONSE.to_string(),
            1 => 0,
            len => self.random.pick(len).min(len - 1),
        };
        trace!(intent = %result.intent.intent_type, index, "Selected response");
        candidates.swap_remove(index)
    }
}

impl Default for ResponseGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn owned(phrases: &[&str]) -> Vec<String> {
    phrases.iter().map(|p| p.to_string()).collect()
}
