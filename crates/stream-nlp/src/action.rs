//! Maps a processed utterance to what the front end should do next.

use serde::{Deserialize, Serialize};

use crate::entity::EntityCategory;
use crate::intent::IntentType;
use crate::NlpResult;

pub const HOME_ROUTE: &str = "/";
pub const MOVIES_ROUTE: &str = "/browse/movies";
pub const SHOWS_ROUTE: &str = "/browse/shows";
pub const MY_LIST_ROUTE: &str = "/my-list";
pub const PROFILE_ROUTE: &str = "/profile";
pub const SEARCH_ROUTE: &str = "/search";

/// Follow-up for the UI layer, keyed off the intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AssistantAction {
    Navigate { route: String },
    Search { query: String },
    Play { title: String },
    Resume,
    Recommend {
        genre: Option<String>,
        rating: Option<String>,
    },
    /// Nothing to do beyond speaking the reply
    Respond,
}

impl AssistantAction {
    pub fn from_result(result: &NlpResult) -> Self {
        let intent = &result.intent;

        match intent.intent_type {
            IntentType::NavigationHome => Self::navigate(HOME_ROUTE),
            IntentType::NavigationMovies => Self::navigate(MOVIES_ROUTE),
            IntentType::NavigationShows => Self::navigate(SHOWS_ROUTE),
            IntentType::NavigationMyList => Self::navigate(MY_LIST_ROUTE),
            IntentType::NavigationProfile => Self::navigate(PROFILE_ROUTE),
            IntentType::Search => match intent.query().filter(|q| !q.is_empty()) {
                Some(query) => Self::Search {
                    query: query.to_string(),
                },
                None => Self::Respond,
            },
            IntentType::PlaybackPlay => match intent.title().filter(|t| !t.is_empty()) {
                Some(title) => Self::Play {
                    title: title.to_string(),
                },
                None => Self::Respond,
            },
            IntentType::PlaybackResume => Self::Resume,
            IntentType::Recommendation => Self::Recommend {
                genre: result.entities.get(&EntityCategory::Genre).cloned(),
                rating: result.entities.get(&EntityCategory::Rating).cloned(),
            },
            IntentType::Help | IntentType::Unknown => Self::Respond,
        }
    }

    fn navigate(route: &str) -> Self {
        Self::Navigate {
            route: route.to_string(),
        }
    }

    /// Route the UI should open, if any.
    pub fn route(&self) -> Option<&str> {
        match self {
            Self::Navigate { route } => Some(route.as_str()),
            Self::Search { .. } => Some(SEARCH_ROUTE),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ConversationContext;
    use crate::entity::Entities;
    use crate::intent::{Intent, QUERY_SLOT, TITLE_SLOT};

    fn result(intent: Intent, entities: Entities) -> NlpResult {
        NlpResult {
            intent,
            entities,
            sentiment: 0.0,
            context: ConversationContext::default(),
        }
    }

    #[test]
    fn test_navigation_routes() {
        let cases = [
            (IntentType::NavigationHome, HOME_ROUTE),
            (IntentType::NavigationMovies, MOVIES_ROUTE),
            (IntentType::NavigationShows, SHOWS_ROUTE),
            (IntentType::NavigationMyList, MY_LIST_ROUTE),
            (IntentType::NavigationProfile, PROFILE_ROUTE),
        ];
        for (intent, route) in cases {
            let action =
                AssistantAction::from_result(&result(Intent::new(intent, 0.9), Entities::new()));
            assert_eq!(action.route(), Some(route));
        }
    }

    #[test]
    fn test_search_and_play_need_slots() {
        let search = Intent::new(IntentType::Search, 0.8).with_slot(QUERY_SLOT, "dune");
        assert_eq!(
            AssistantAction::from_result(&result(search, Entities::new())),
            AssistantAction::Search {
                query: "dune".to_string()
            }
        );

        let bare = Intent::new(IntentType::PlaybackPlay, 0.95).with_slot(TITLE_SLOT, "");
        assert_eq!(
            AssistantAction::from_result(&result(bare, Entities::new())),
            AssistantAction::Respond
        );
    }

    #[test]
    fn test_recommend_carries_entities() {
        let mut entities = Entities::new();
        entities.insert(EntityCategory::Genre, "comedy".to_string());
        let action = AssistantAction::from_result(&result(
            Intent::new(IntentType::Recommendation, 0.8),
            entities,
        ));
        assert_eq!(
            action,
            AssistantAction::Recommend {
                genre: Some("comedy".to_string()),
                rating: None,
            }
        );
        assert_eq!(action.route(), None);
    }

    #[test]
    fn test_action_serializes_tagged() {
        let json = serde_json::to_value(AssistantAction::Resume).unwrap();
        assert_eq!(json["action"], "resume");
    }
}
