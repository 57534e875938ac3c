//! Succession resolution: the "replaced by / followed by" business rule.
//!
//! A company that merged or was acquired resolves to its present-day
//! legal identity, not its defunct predecessor.

use spl_core::{Entity, GraphError, GraphService};

use crate::trail::{Trail, TraversalError};

/// Advance a possibly-historical entity to its current legal successor.
///
/// Iterates while the entity is historical and carries a successor edge,
/// appending each hop to the trail. A historical entity without a
/// successor is a dead end and is returned as the final identity; a
/// successor id that no longer resolves ends the chain at the last good
/// entity.
///
/// # Errors
///
/// [`TraversalError::CycleDetected`] / [`TraversalError::MaxHopsExceeded`]
/// when the guard trips (malformed graph data such as A→B→A), or
/// [`TraversalError::Graph`] when a fetch fails hard.
pub async fn advance_to_current<S: GraphService>(
    graph: &S,
    mut entity: Entity,
    trail: &mut Trail,
) -> Result<Entity, TraversalError> {
    while entity.is_historical {
        let Some(successor_id) = entity.successor_id.clone() else {
            tracing::debug!(id = %entity.id, "succession dead end, dissolved company");
            break;
        };
        let successor = match graph.fetch_properties(&successor_id).await {
            Ok(successor) => successor,
            Err(GraphError::NotFound { .. }) => {
                tracing::warn!(
                    id = %entity.id,
                    successor = %successor_id,
                    "successor no longer resolves, ending chain here"
                );
                break;
            }
            Err(err) => return Err(err.into()),
        };
        trail.visit(&successor.id)?;
        tracing::debug!(from = %entity.id, to = %successor.id, "advanced succession");
        entity = successor;
    }
    Ok(entity)
}
