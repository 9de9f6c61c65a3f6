//! Word-list sentiment scoring.

use crate::vocabulary::{NEGATIVE_WORDS, POSITIVE_WORDS};

const WORD_WEIGHT: f64 = 0.2;

/// Scores utterances in `[-1, 1]` by counting exact positive/negative tokens.
///
/// Tokens are whitespace-separated and compared verbatim, so `"love!"` does
/// not count as `"love"`.
#[derive(Debug, Clone, Default)]
pub struct SentimentScorer;

impl SentimentScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, input: &str) -> f64 {
        let input = input.to_lowercase();
        let (positive, negative) = input.split_whitespace().fold((0u32, 0u32), |(pos, neg), token| {
            (
                pos + POSITIVE_WORDS.contains(&token) as u32,
                neg + NEGATIVE_WORDS.contains(&token) as u32,
            )
        });

        ((f64::from(positive) - f64::from(negative)) * WORD_WEIGHT).clamp(-1.0, 1.0)
    }
}
