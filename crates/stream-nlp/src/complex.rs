//! Parser for longer, structured requests such as
//! "show me movies with tom hanks from 1990s".
//!
//! Patterns are tried in order and the first match wins.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reply used when no structured pattern applies.
pub const COMPLEX_FALLBACK: &str =
    "I understand you're asking something specific, but I need more information.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Movie,
    Show,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Show => "show",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendKind {
    New,
    Trending,
    Popular,
}

impl TrendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Trending => "trending",
            Self::Popular => "popular",
        }
    }
}

/// A structured request pulled out of free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComplexQuery {
    /// Titles of a kind featuring a cast member from a period
    CastSearch {
        content_kind: ContentKind,
        actor: String,
        year: String,
    },
    /// Titles similar to one the user already likes
    SimilarTo { liked: String },
    /// New or popular titles within a timeframe
    Trending { kind: TrendKind, timeframe: String },
}

impl ComplexQuery {
    /// The four-digit year of a cast search (`"1990s"` gives `"1990"`).
    pub fn year_prefix(&self) -> Option<&str> {
        match self {
            Self::CastSearch { year, .. } => year.get(..4),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::CastSearch {
                content_kind,
                actor,
                year,
            } => format!("Here are {}s with {} from {}", content_kind.as_str(), actor, year),
            Self::SimilarTo { liked } => {
                format!("If you like {}, you might enjoy these:", liked)
            }
            Self::Trending { kind, timeframe } => {
                format!("Here's what's {} {}:", kind.as_str(), timeframe)
            }
        }
    }
}

type Builder = fn(&Captures<'_>) -> ComplexQuery;

struct ComplexPattern {
    regex: Regex,
    build: Builder,
}

fn group(captures: &Captures<'_>, index: usize) -> String {
    captures
        .get(index)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

fn cast_search(c: &Captures<'_>) -> ComplexQuery {
    let content_kind = if group(c, 1).to_lowercase().contains("movie") {
        ContentKind::Movie
    } else {
        ContentKind::Show
    };
    ComplexQuery::CastSearch {
        content_kind,
        actor: group(c, 2),
        year: group(c, 3),
    }
}

fn similar_to(c: &Captures<'_>) -> ComplexQuery {
    ComplexQuery::SimilarTo { liked: group(c, 2) }
}

fn trending(c: &Captures<'_>) -> ComplexQuery {
    let kind = match group(c, 1).to_lowercase().as_str() {
        "new" => TrendKind::New,
        "trending" => TrendKind::Trending,
        _ => TrendKind::Popular,
    };
    ComplexQuery::Trending {
        kind,
        timeframe: group(c, 2).to_lowercase(),
    }
}

lazy_static! {
    static ref COMPLEX_PATTERNS: Vec<ComplexPattern> = vec![
        ComplexPattern {
            regex: Regex::new(r"(?i)show me (.*) with (.*) from (\d{4}s?|\d{4})").unwrap(),
            build: cast_search,
        },
        ComplexPattern {
            regex: Regex::new(r"(?i)what should i watch if i (like|love|enjoy) (.*)").unwrap(),
            build: similar_to,
        },
        ComplexPattern {
            regex: Regex::new(r"(?i)what's (new|trending|popular) (this week|this month|today|now)").unwrap(),
            build: trending,
        },
    ];
}

/// Matches structured requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexQueryParser;

impl ComplexQueryParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, input: &str) -> Option<ComplexQuery> {
        let input = input.trim();
        let query = COMPLEX_PATTERNS
            .iter()
            .find_map(|pattern| pattern.regex.captures(input).map(|c| (pattern.build)(&c)));

        match &query {
            Some(q) => debug!("Parsed complex query: {:?}", q),
            None => debug!("No complex pattern matched"),
        }
        query
    }
}
