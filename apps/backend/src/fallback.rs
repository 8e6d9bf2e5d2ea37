//! Data served for public resources while the store is unavailable.

use crate::repos::events::Event;
use crate::repos::exchange_rates::ExchangeRate;
use crate::repos::knowledge::KnowledgeEntry;

pub trait FallbackProvider: Send + Sync {
    fn exchange_rates(&self) -> Vec<ExchangeRate> {
        Vec::new()
    }

    fn events(&self) -> Vec<Event> {
        Vec::new()
    }

    fn knowledge_entries(&self) -> Vec<KnowledgeEntry> {
        Vec::new()
    }
}

/// Serves nothing; degraded reads come back empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyFallback;

impl FallbackProvider for EmptyFallback {}

/// Serves a fixed snapshot.
#[derive(Debug, Default, Clone)]
pub struct SnapshotFallback {
    pub exchange_rates: Vec<ExchangeRate>,
    pub events: Vec<Event>,
    pub knowledge_entries: Vec<KnowledgeEntry>,
}

impl SnapshotFallback {
    pub fn with_exchange_rates(mut self, rates: Vec<ExchangeRate>) -> Self {
        self.exchange_rates = rates;
        self
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    pub fn with_knowledge_entries(mut self, entries: Vec<KnowledgeEntry>) -> Self {
        self.knowledge_entries = entries;
        self
    }
}

impl FallbackProvider for SnapshotFallback {
    fn exchange_rates(&self) -> Vec<ExchangeRate> {
        self.exchange_rates.clone()
    }

    fn events(&self) -> Vec<Event> {
        self.events.clone()
    }

    fn knowledge_entries(&self) -> Vec<KnowledgeEntry> {
        self.knowledge_entries.clone()
    }
}
