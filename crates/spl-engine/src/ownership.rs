//! Ownership traversal: walk parent-company edges upward from a private
//! subsidiary until a publicly-traded ancestor is found or the chain is
//! exhausted.

use spl_core::{Entity, GraphError, GraphService};

use crate::succession::advance_to_current;
use crate::trail::{Trail, TraversalError};

/// Result of an ownership ascent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ascent {
    /// The topmost entity reached: the public ancestor on success, or the
    /// last private entity when the hierarchy has no listing.
    pub entity: Entity,
    pub is_public: bool,
}

/// Ascend parent edges until a public listing appears.
///
/// Each parent is itself advanced through the succession resolver before
/// the next step, in case it was later replaced: the two traversals
/// compose rather than running independently. A parent id that no longer
/// resolves ends the ascent at the current entity (private).
///
/// # Errors
///
/// Guard trips ([`TraversalError::CycleDetected`],
/// [`TraversalError::MaxHopsExceeded`]) and hard graph failures; callers
/// treat guard trips as private/unresolved for the query only.
pub async fn ascend_to_public<S: GraphService>(
    graph: &S,
    mut entity: Entity,
    trail: &mut Trail,
) -> Result<Ascent, TraversalError> {
    loop {
        if entity.is_public() {
            return Ok(Ascent {
                entity,
                is_public: true,
            });
        }
        let Some(parent_id) = entity.parent_id.clone() else {
            tracing::debug!(id = %entity.id, "top of hierarchy, no public ancestor");
            return Ok(Ascent {
                entity,
                is_public: false,
            });
        };
        let parent = match graph.fetch_properties(&parent_id).await {
            Ok(parent) => parent,
            Err(GraphError::NotFound { .. }) => {
                tracing::warn!(
                    id = %entity.id,
                    parent = %parent_id,
                    "parent no longer resolves, treating as private"
                );
                return Ok(Ascent {
                    entity,
                    is_public: false,
                });
            }
            Err(err) => return Err(err.into()),
        };
        trail.visit(&parent.id)?;
        tracing::debug!(from = %entity.id, to = %parent.id, "ascended to parent");
        entity = advance_to_current(graph, parent, trail).await?;
    }
}
