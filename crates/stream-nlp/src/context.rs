//! Conversation context.
//!
//! A [`ContextStore`] remembers the previous turn of one assistant session for
//! a limited window (five minutes by default). [`SessionRegistry`] keeps one
//! store per session so concurrent sessions never see each other's state.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use stream_core::{NlpConfig, SessionId};
use tracing::debug;

use crate::entity::{Entities, EntityCategory};
use crate::intent::{Intent, IntentType};

/// Default validity window of a conversation context.
pub const DEFAULT_CONTEXT_TTL: Duration = Duration::from_secs(5 * 60);

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// What the assistant remembers about the previous turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    pub last_intent: Option<IntentType>,
    #[serde(default)]
    pub last_entities: Entities,
    /// Sticky: set by a search carrying a genre
    pub preferred_genre: Option<String>,
    /// Sticky: set by any playback intent carrying a title
    pub last_title: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl ConversationContext {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// A context that was never updated counts as stale.
    pub fn is_stale(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match self.last_updated {
            None => true,
            Some(updated) => match (now - updated).to_std() {
                Ok(elapsed) => elapsed > ttl,
                // clock went backwards
                Err(_) => false,
            },
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Context of a single session.
pub struct ContextStore {
    context: ConversationContext,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock), DEFAULT_CONTEXT_TTL)
    }

    pub fn with_clock(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            context: ConversationContext::default(),
            clock,
            ttl,
        }
    }

    pub fn from_config(config: &NlpConfig) -> Self {
        Self::with_clock(Arc::new(SystemClock), config.context_ttl())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Records a turn.
    ///
    /// A stale context is cleared first, so sticky fields only survive while
    /// turns keep arriving within the window.
    pub fn update(&mut self, intent: &Intent, entities: &Entities) {
        let now = self.clock.now();

        if self.context.is_stale(now, self.ttl) {
            if !self.context.is_empty() {
                debug!("Conversation context expired, resetting");
            }
            self.context.clear();
        }

        self.context.last_intent = Some(intent.intent_type);
        self.context.last_entities = entities.clone();
        self.context.last_updated = Some(now);

        if intent.intent_type == IntentType::Search {
            if let Some(genre) = entities.get(&EntityCategory::Genre) {
                self.context.preferred_genre = Some(genre.clone());
            }
        }

        if intent.intent_type.is_playback() {
            if let Some(title) = intent.title().filter(|t| !t.is_empty()) {
                self.context.last_title = Some(title.to_string());
            }
        }
    }

    /// Current context; empty once the window has lapsed.
    pub fn snapshot(&self) -> ConversationContext {
        if self.context.is_stale(self.clock.now(), self.ttl) {
            ConversationContext::default()
        } else {
            self.context.clone()
        }
    }

    pub fn reset(&mut self) {
        debug!("Conversation context reset");
        self.context.clear();
    }

    pub fn is_stale(&self) -> bool {
        self.context.is_stale(self.clock.now(), self.ttl)
    }
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-session context stores.
pub struct SessionRegistry {
    stores: DashMap<SessionId, ContextStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock), DEFAULT_CONTEXT_TTL)
    }

    pub fn with_clock(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            stores: DashMap::new(),
            clock,
            ttl,
        }
    }

    pub fn from_config(config: &NlpConfig) -> Self {
        Self::with_clock(Arc::new(SystemClock), config.context_ttl())
    }

    /// Runs `f` against the session's store, creating it on first use.
    pub fn with_store<R>(&self, session: SessionId, f: impl FnOnce(&mut ContextStore) -> R) -> R {
        let mut store = self
            .stores
            .entry(session)
            .or_insert_with(|| ContextStore::with_clock(self.clock.clone(), self.ttl));
        f(store.value_mut())
    }

    pub fn update(&self, session: SessionId, intent: &Intent, entities: &Entities) {
        self.with_store(session, |store| store.update(intent, entities));
    }

    pub fn snapshot(&self, session: SessionId) -> ConversationContext {
        self.stores
            .get(&session)
            .map(|store| store.snapshot())
            .unwrap_or_default()
    }

    pub fn reset(&self, session: SessionId) {
        if let Some(mut store) = self.stores.get_mut(&session) {
            store.reset();
        }
    }

    /// Forgets a session entirely. Returns whether it existed.
    pub fn remove(&self, session: SessionId) -> bool {
        self.stores.remove(&session).is_some()
    }

    /// Drops every session whose context has outlived the window.
    pub fn evict_stale(&self) -> usize {
        let before = self.stores.len();
        self.stores.retain(|_, store| !store.is_stale());
        let evicted = before.saturating_sub(self.stores.len());
        if evicted > 0 {
            debug!("Evicted {} stale sessions", evicted);
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
