//! Candidate verification and ranking.
//!
//! Candidates arrive in the external search service's relevance order and
//! are examined in that order; the first one verifying as publicly listed
//! wins. No re-ranking: same input, same output.

use spl_core::{Entity, EntityId, GraphError, GraphService};

use crate::ownership::ascend_to_public;
use crate::succession::advance_to_current;
use crate::trail::{Trail, TraversalError};

/// What verification concluded about a query's candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// A candidate carries a listing, directly or via a public ancestor.
    Listed { entity: Entity, path: Vec<EntityId> },
    /// Best match is a dissolved company: historical, no successor, no
    /// public ancestor.
    Dissolved { entity: Entity, path: Vec<EntityId> },
    /// Best match exists but is private with no public ancestor.
    PrivateOnly { entity: Entity, path: Vec<EntityId> },
    /// No candidate survived verification.
    NoMatch,
}

/// Verify candidates in rank order and pick the winner.
///
/// The first candidate that is public (directly or through its ownership
/// chain) is returned immediately. Dissolved and private-only matches are
/// remembered as fallbacks in case no candidate is listed. Candidates
/// whose traversal trips a cycle or hop guard are skipped; candidates
/// whose id does not resolve fall through to the next.
///
/// # Errors
///
/// Hard graph failures (transient errors that survived the client's
/// retries) abort verification for this query; the caller records the
/// query unresolved with the reason.
pub async fn verify<S: GraphService>(
    graph: &S,
    candidates: &[EntityId],
    max_hops: usize,
) -> Result<Verification, GraphError> {
    let mut dissolved: Option<(Entity, Vec<EntityId>)> = None;
    let mut private: Option<(Entity, Vec<EntityId>)> = None;

    for id in candidates {
        match examine(graph, id, max_hops).await? {
            Some(Verification::Listed { entity, path }) => {
                return Ok(Verification::Listed { entity, path });
            }
            Some(Verification::Dissolved { entity, path }) => {
                dissolved.get_or_insert((entity, path));
            }
            Some(Verification::PrivateOnly { entity, path }) => {
                private.get_or_insert((entity, path));
            }
            Some(Verification::NoMatch) | None => {}
        }
    }

    // A dissolved identification is more definitive than a private one.
    if let Some((entity, path)) = dissolved {
        return Ok(Verification::Dissolved { entity, path });
    }
    if let Some((entity, path)) = private {
        return Ok(Verification::PrivateOnly { entity, path });
    }
    Ok(Verification::NoMatch)
}

/// Run succession and ownership for one candidate and classify the
/// outcome. `None` means the candidate is unusable (unresolvable id or a
/// tripped traversal guard) and the next one should be tried.
async fn examine<S: GraphService>(
    graph: &S,
    id: &EntityId,
    max_hops: usize,
) -> Result<Option<Verification>, GraphError> {
    let origin = match graph.fetch_properties(id).await {
        Ok(entity) => entity,
        Err(GraphError::NotFound { .. }) => {
            tracing::debug!(%id, "candidate id does not resolve");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    let mut trail = Trail::start(origin.id.clone(), max_hops);

    let current = match advance_to_current(graph, origin, &mut trail).await {
        Ok(entity) => entity,
        Err(TraversalError::Graph(err)) => return Err(err),
        Err(guard) => {
            tracing::warn!(candidate = %id, error = %guard, "succession guard tripped, skipping candidate");
            return Ok(None);
        }
    };

    let ascent = match ascend_to_public(graph, current, &mut trail).await {
        Ok(ascent) => ascent,
        Err(TraversalError::Graph(err)) => return Err(err),
        Err(guard) => {
            tracing::warn!(candidate = %id, error = %guard, "ownership guard tripped, skipping candidate");
            return Ok(None);
        }
    };

    let path = trail.into_path();
    let verification = if ascent.entity.is_dead_end() {
        // Even with a lingering ticker claim the company is defunct.
        Verification::Dissolved {
            entity: ascent.entity,
            path,
        }
    } else if ascent.is_public {
        Verification::Listed {
            entity: ascent.entity,
            path,
        }
    } else {
        Verification::PrivateOnly {
            entity: ascent.entity,
            path,
        }
    };
    Ok(Some(verification))
}
