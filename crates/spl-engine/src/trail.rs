//! Traversal bookkeeping.
//!
//! Succession and ownership walks carry a [`Trail`]: the ordered audit
//! path plus a visited set and hop cap, so cycle and depth guards are
//! structural properties of the walk rather than recursion-depth luck.

use std::collections::HashSet;

use spl_core::{EntityId, GraphError};
use thiserror::Error;

/// Why a traversal stopped abnormally. Terminal for the query at hand,
/// never fatal for the batch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TraversalError {
    /// The graph led back to an id already on the path (e.g. A→B→A).
    #[error("cycle detected at {id}")]
    CycleDetected { id: EntityId },

    /// The walk exceeded the configured hop budget; malformed or
    /// degenerate hierarchies are cut off here.
    #[error("maximum hop count {max} exceeded")]
    MaxHopsExceeded { max: usize },

    /// The graph backend failed hard (retries already exhausted).
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Ordered record of one resolution's graph walk.
#[derive(Debug, Clone)]
pub struct Trail {
    path: Vec<EntityId>,
    visited: HashSet<EntityId>,
    max_hops: usize,
}

impl Trail {
    /// Start a trail at the origin entity. The origin occupies the path
    /// but costs no hops.
    #[must_use]
    pub fn start(origin: EntityId, max_hops: usize) -> Self {
        let mut visited = HashSet::new();
        visited.insert(origin.clone());
        Self {
            path: vec![origin],
            visited,
            max_hops,
        }
    }

    /// Record one hop.
    ///
    /// # Errors
    ///
    /// [`TraversalError::CycleDetected`] when `id` is already on the path,
    /// [`TraversalError::MaxHopsExceeded`] when the hop budget is spent.
    pub fn visit(&mut self, id: &EntityId) -> Result<(), TraversalError> {
        if self.visited.contains(id) {
            return Err(TraversalError::CycleDetected { id: id.clone() });
        }
        if self.hops() >= self.max_hops {
            return Err(TraversalError::MaxHopsExceeded { max: self.max_hops });
        }
        self.visited.insert(id.clone());
        self.path.push(id.clone());
        Ok(())
    }

    /// Hops taken so far (path length minus the origin).
    #[must_use]
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    #[must_use]
    pub fn path(&self) -> &[EntityId] {
        &self.path
    }

    #[must_use]
    pub fn into_path(self) -> Vec<EntityId> {
        self.path
    }
}
