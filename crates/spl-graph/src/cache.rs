//! Per-run memoization of graph lookups.
//!
//! The cache is process-scoped and unbounded (input-sized); there is no
//! eviction or TTL. It is shared across concurrent resolutions behind a
//! mutex, which is cheap next to the network latency it saves.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use spl_core::{Entity, EntityId, GraphError, GraphService};

/// Key space of the cache: entity ids and normalized search strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CacheKey {
    Entity(EntityId),
    Search(String),
}

#[derive(Debug, Clone)]
enum CacheValue {
    Entity(Entity),
    /// Negative entity lookup; replayed as `NotFound` without re-querying.
    Missing,
    Hits(Vec<EntityId>),
}

/// Shared name→hits and id→entity memo for one run.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    inner: Mutex<HashMap<CacheKey, CacheValue>>,
}

impl ResolutionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached entity lookup. `Some(Err(NotFound))` replays a negative
    /// result; `None` is a miss.
    #[must_use]
    pub fn get_entity(&self, id: &EntityId) -> Option<Result<Entity, GraphError>> {
        let guard = self.lock();
        match guard.get(&CacheKey::Entity(id.clone()))? {
            CacheValue::Entity(entity) => Some(Ok(entity.clone())),
            CacheValue::Missing => Some(Err(GraphError::NotFound {
                id: id.to_string(),
            })),
            CacheValue::Hits(_) => None,
        }
    }

    pub fn put_entity(&self, entity: &Entity) {
        self.lock().insert(
            CacheKey::Entity(entity.id.clone()),
            CacheValue::Entity(entity.clone()),
        );
    }

    pub fn put_missing(&self, id: &EntityId) {
        self.lock()
            .insert(CacheKey::Entity(id.clone()), CacheValue::Missing);
    }

    #[must_use]
    pub fn get_search(&self, term: &str) -> Option<Vec<EntityId>> {
        let guard = self.lock();
        match guard.get(&CacheKey::Search(term.to_string()))? {
            CacheValue::Hits(hits) => Some(hits.clone()),
            _ => None,
        }
    }

    pub fn put_search(&self, term: &str, hits: &[EntityId]) {
        self.lock().insert(
            CacheKey::Search(term.to_string()),
            CacheValue::Hits(hits.to_vec()),
        );
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, CacheValue>> {
        // A poisoned lock means another resolution panicked mid-insert; the
        // map itself is still a valid memo, so keep serving it.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Memoizing wrapper around any [`GraphService`].
///
/// Every successful fetch populates the cache; repeated lookups for the
/// same key within a run issue exactly one underlying query. Negative
/// entity lookups are cached too, so a dead id is not re-queried per
/// candidate.
#[derive(Debug)]
pub struct CachedGraph<S> {
    service: S,
    cache: Arc<ResolutionCache>,
}

impl<S> CachedGraph<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            cache: Arc::new(ResolutionCache::new()),
        }
    }

    pub fn with_cache(service: S, cache: Arc<ResolutionCache>) -> Self {
        Self { service, cache }
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<ResolutionCache> {
        &self.cache
    }

    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }
}

impl<S: GraphService> CachedGraph<S> {
    async fn fetch_cached(&self, id: &EntityId) -> Result<Entity, GraphError> {
        if let Some(hit) = self.cache.get_entity(id) {
            tracing::debug!(%id, "entity cache hit");
            return hit;
        }
        match self.service.fetch_properties(id).await {
            Ok(entity) => {
                self.cache.put_entity(&entity);
                Ok(entity)
            }
            Err(GraphError::NotFound { id: missing }) => {
                self.cache.put_missing(id);
                Err(GraphError::NotFound { id: missing })
            }
            Err(err) => Err(err),
        }
    }
}

impl<S: GraphService> GraphService for CachedGraph<S> {
    async fn find_direct(&self, id: &EntityId) -> Result<Entity, GraphError> {
        self.fetch_cached(id).await
    }

    async fn search(&self, term: &str) -> Result<Vec<EntityId>, GraphError> {
        if let Some(hits) = self.cache.get_search(term) {
            tracing::debug!(term, "search cache hit");
            return Ok(hits);
        }
        let hits = self.service.search(term).await?;
        self.cache.put_search(term, &hits);
        Ok(hits)
    }

    async fn fetch_properties(&self, id: &EntityId) -> Result<Entity, GraphError> {
        self.fetch_cached(id).await
    }
}
