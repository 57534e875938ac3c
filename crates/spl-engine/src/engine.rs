//! Per-query orchestration.
//!
//! One [`ResolutionEngine`] owns the memoizing graph handle and the
//! traversal limits, and is passed by reference into every resolution:
//! there is no global session or cache state.

use std::sync::Arc;

use spl_core::{
    Entity, EntityId, GraphError, GraphService, PRIVATE_UNLISTED, ResolutionResult,
    ResolutionStatus, SponsorQuery, normalize,
};
use spl_graph::{CachedGraph, ResolutionCache};

use crate::verify::{Verification, verify};

/// Guard rails for succession/ownership walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalLimits {
    /// Maximum combined successor + parent hops per candidate.
    pub max_hops: usize,
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self { max_hops: 10 }
    }
}

/// The resolution pipeline: normalize → search → succession → ownership →
/// verify, with all graph lookups memoized for the run.
pub struct ResolutionEngine<S> {
    graph: CachedGraph<S>,
    limits: TraversalLimits,
}

impl<S: GraphService> ResolutionEngine<S> {
    pub fn new(service: S, limits: TraversalLimits) -> Self {
        Self {
            graph: CachedGraph::new(service),
            limits,
        }
    }

    /// Handle to the run-scoped cache, shared across concurrent
    /// resolutions.
    #[must_use]
    pub fn cache(&self) -> &Arc<ResolutionCache> {
        self.graph.cache()
    }

    /// Resolve one sponsor query to completion. Never fails the batch:
    /// every error path degrades to an `Unresolved` result with the
    /// reason logged.
    pub async fn resolve(&self, query: SponsorQuery) -> ResolutionResult {
        if query.is_malformed() {
            tracing::warn!(key = %query.key, "skipping empty sponsor name");
            return ResolutionResult::unresolved(query);
        }

        let candidates = match self.gather_candidates(&query).await {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::warn!(key = %query.key, error = %err, "resolution failed hard");
                return ResolutionResult::unresolved(query);
            }
        };

        match verify(&self.graph, &candidates, self.limits.max_hops).await {
            Ok(Verification::Listed { entity, path }) => {
                Self::assemble(query, entity, path, ResolutionStatus::Active)
            }
            Ok(Verification::Dissolved { entity, path }) => {
                Self::assemble(query, entity, path, ResolutionStatus::Inactive)
            }
            Ok(Verification::PrivateOnly { entity, path }) => {
                // Found, but nothing in the chain is listed: report
                // unresolved with the private sentinel, per contract the
                // resolved entity stays absent.
                let source_uri = path.last().map(EntityId::uri);
                ResolutionResult {
                    company: entity.label,
                    ticker: Some(PRIVATE_UNLISTED.to_string()),
                    exchange: None,
                    status: ResolutionStatus::Unresolved,
                    source_uri,
                    path,
                    resolved: None,
                    query,
                }
            }
            Ok(Verification::NoMatch) => ResolutionResult::unresolved(query),
            Err(err) => {
                tracing::warn!(key = %query.key, error = %err, "verification failed hard");
                ResolutionResult::unresolved(query)
            }
        }
    }

    /// Candidate ids in preference order: the pre-linked id when it still
    /// resolves, otherwise ranked search hits across normalizer variants
    /// (deduplicated, first-seen order preserved).
    async fn gather_candidates(&self, query: &SponsorQuery) -> Result<Vec<EntityId>, GraphError> {
        if let Some(linked) = &query.linked_id {
            match self.graph.find_direct(linked).await {
                Ok(entity) => return Ok(vec![entity.id]),
                Err(GraphError::NotFound { .. }) => {
                    tracing::debug!(key = %query.key, %linked, "linked id no longer resolves, falling back to search");
                }
                Err(err) => return Err(err),
            }
        }

        let mut candidates: Vec<EntityId> = Vec::new();
        for term in normalize::candidates(&query.raw_name) {
            match self.graph.search(&term).await {
                Ok(hits) => {
                    for hit in hits {
                        if !candidates.contains(&hit) {
                            candidates.push(hit);
                        }
                    }
                }
                // Search never fails the caller; a failed variant just
                // contributes nothing.
                Err(err) => {
                    tracing::warn!(term, error = %err, "search variant failed");
                }
            }
        }
        Ok(candidates)
    }

    fn assemble(
        query: SponsorQuery,
        entity: Entity,
        path: Vec<EntityId>,
        status: ResolutionStatus,
    ) -> ResolutionResult {
        let source_uri = path.last().map(EntityId::uri);
        ResolutionResult {
            company: entity.label.clone(),
            ticker: entity
                .ticker
                .clone()
                .or_else(|| Some(PRIVATE_UNLISTED.to_string())),
            exchange: entity.exchange.clone(),
            status,
            source_uri,
            path,
            resolved: Some(entity),
            query,
        }
    }
}
