use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Opaque identifier of a knowledge-graph node (a Wikidata QID such as
/// `Q206921`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub String);

impl EntityId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical entity URI for audit output.
    #[must_use]
    pub fn uri(&self) -> String {
        format!("http://www.wikidata.org/entity/{}", self.0)
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Immutable snapshot of a knowledge-graph entity.
///
/// Fetched lazily and never mutated after retrieval; a re-query produces a
/// fresh snapshot with the same id. Consumers branch on field presence, not
/// on dynamic type inspection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entity {
    pub id: EntityId,
    pub label: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// True when the graph marks the company as replaced, merged, or
    /// dissolved under this identity.
    #[serde(default)]
    pub is_historical: bool,
    /// "Replaced by" / "followed by" edge to the present-day legal
    /// continuation.
    pub successor_id: Option<EntityId>,
    /// Parent-organization edge (owner fallback when no parent exists).
    pub parent_id: Option<EntityId>,
    pub ticker: Option<String>,
    pub exchange: Option<String>,
}

impl Entity {
    /// Whether the entity carries a public market listing.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.ticker.is_some() || self.exchange.is_some()
    }

    /// A historical entity with no successor edge: a dissolved company
    /// whose chain ends here.
    #[must_use]
    pub fn is_dead_end(&self) -> bool {
        self.is_historical && self.successor_id.is_none()
    }
}
