//! The seam between the resolution engine and a graph backend.

use std::future::Future;

use crate::entity::{Entity, EntityId};
use crate::errors::GraphError;

/// Read-only access to the external knowledge graph.
///
/// Implemented by the Wikidata HTTP client in `spl-graph`, by the memoizing
/// `CachedGraph` wrapper, and by in-memory mocks in engine tests. The
/// engine never talks to a transport directly; passing the service in
/// explicitly (instead of a module-global session) keeps parallel test
/// instances isolated.
pub trait GraphService: Send + Sync {
    /// Resolve a pre-known identifier to its current entity record.
    ///
    /// # Errors
    ///
    /// [`GraphError::NotFound`] if the identifier no longer resolves;
    /// transport errors as their respective variants.
    fn find_direct(
        &self,
        id: &EntityId,
    ) -> impl Future<Output = Result<Entity, GraphError>> + Send;

    /// Search entities by label or alias, in the backend's relevance order.
    /// An empty vec means no match.
    ///
    /// # Errors
    ///
    /// Transport errors only; a miss is `Ok(vec![])`. Callers in the
    /// pipeline treat an error as an empty candidate list.
    fn search(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Vec<EntityId>, GraphError>> + Send;

    /// Fetch the full property set for a known id.
    ///
    /// # Errors
    ///
    /// [`GraphError::NotFound`] for an invalid id, [`GraphError::Transient`]
    /// for network/service failures after retries are exhausted.
    fn fetch_properties(
        &self,
        id: &EntityId,
    ) -> impl Future<Output = Result<Entity, GraphError>> + Send;
}
