//! In-memory graph backend for engine tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use spl_core::{Entity, EntityId, GraphError, GraphService};

/// Synthetic knowledge graph with per-call counters, so tests can assert
/// both pipeline outcomes and how many queries they cost.
#[derive(Default)]
pub struct MockGraph {
    entities: HashMap<EntityId, Entity>,
    searches: HashMap<String, Vec<EntityId>>,
    pub fetch_count: AtomicUsize,
    pub search_count: AtomicUsize,
    pub search_log: Mutex<Vec<String>>,
}

impl MockGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.insert(entity.id.clone(), entity);
        self
    }

    pub fn with_search(mut self, term: &str, hits: &[&str]) -> Self {
        self.searches.insert(
            term.to_string(),
            hits.iter().map(|id| EntityId::from(*id)).collect(),
        );
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    pub fn searches_issued(&self) -> usize {
        self.search_count.load(Ordering::SeqCst)
    }
}

impl GraphService for MockGraph {
    async fn find_direct(&self, id: &EntityId) -> Result<Entity, GraphError> {
        self.fetch_properties(id).await
    }

    async fn search(&self, term: &str) -> Result<Vec<EntityId>, GraphError> {
        self.search_count.fetch_add(1, Ordering::SeqCst);
        self.search_log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(term.to_string());
        Ok(self.searches.get(term).cloned().unwrap_or_default())
    }

    async fn fetch_properties(&self, id: &EntityId) -> Result<Entity, GraphError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.entities
            .get(id)
            .cloned()
            .ok_or_else(|| GraphError::NotFound { id: id.to_string() })
    }
}

/// Bare entity with every optional field unset.
pub fn entity(id: &str, label: &str) -> Entity {
    Entity {
        id: EntityId::from(id),
        label: label.to_string(),
        aliases: Vec::new(),
        is_historical: false,
        successor_id: None,
        parent_id: None,
        ticker: None,
        exchange: None,
    }
}

/// Entity replaced by `successor`.
pub fn historical(id: &str, label: &str, successor: &str) -> Entity {
    Entity {
        is_historical: true,
        successor_id: Some(EntityId::from(successor)),
        ..entity(id, label)
    }
}

/// Publicly listed entity.
pub fn listed(id: &str, label: &str, ticker: &str, exchange: &str) -> Entity {
    Entity {
        ticker: Some(ticker.to_string()),
        exchange: Some(exchange.to_string()),
        ..entity(id, label)
    }
}

/// Private entity owned by `parent`.
pub fn subsidiary(id: &str, label: &str, parent: &str) -> Entity {
    Entity {
        parent_id: Some(EntityId::from(parent)),
        ..entity(id, label)
    }
}
