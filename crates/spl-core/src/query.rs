use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// One resolution request: a raw sponsor string plus the identifying key it
/// came in under (an NCT trial id, or the sponsor name itself for dataset
/// extraction). Created once per input row and consumed once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SponsorQuery {
    /// Identifying key carried through to the output row.
    pub key: String,
    /// Free-text sponsor name as found in the source dataset.
    pub raw_name: String,
    /// Pre-known graph identifier, when the source row is already linked
    /// (e.g. a trial record with a Wikidata link).
    pub linked_id: Option<EntityId>,
}

impl SponsorQuery {
    #[must_use]
    pub fn new(key: impl Into<String>, raw_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            raw_name: raw_name.into(),
            linked_id: None,
        }
    }

    #[must_use]
    pub fn with_linked_id(mut self, id: EntityId) -> Self {
        self.linked_id = Some(id);
        self
    }

    /// An empty or whitespace-only raw name cannot be resolved and is
    /// skipped with a logged reason rather than searched.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        self.raw_name.trim().is_empty()
    }
}
