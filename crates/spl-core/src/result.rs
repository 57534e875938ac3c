use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::query::SponsorQuery;

/// Ticker sentinel for a company that was found in the graph but has no
/// public listing anywhere in its ownership chain. True non-matches carry
/// no ticker at all; the two failure shapes are distinct.
pub const PRIVATE_UNLISTED: &str = "Private/Unlisted";

/// Final classification of a resolution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    /// The final entity carries a current public listing.
    Active,
    /// A historical entity with no successor and no public ancestor: a
    /// dissolved company.
    Inactive,
    /// No candidate survived verification.
    Unresolved,
}

impl ResolutionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Unresolved => "Unresolved",
        }
    }
}

impl Display for ResolutionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one sponsor resolution, including the audit trail of
/// successor/parent hops taken.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolutionResult {
    pub query: SponsorQuery,
    pub resolved: Option<Entity>,
    /// Resolved company name, or the raw sponsor name when unresolved.
    pub company: String,
    /// Ticker symbol, [`PRIVATE_UNLISTED`] for found-but-private entities,
    /// absent for true non-matches.
    pub ticker: Option<String>,
    pub exchange: Option<String>,
    pub status: ResolutionStatus,
    /// URI of the final entity in `path`, never an intermediate one.
    pub source_uri: Option<String>,
    /// Ordered ids visited during succession and ownership traversal. No
    /// repeats; bounded by the configured hop cap.
    pub path: Vec<EntityId>,
}

impl ResolutionResult {
    /// A resolution that never matched a graph entity.
    #[must_use]
    pub fn unresolved(query: SponsorQuery) -> Self {
        let company = query.raw_name.clone();
        Self {
            query,
            resolved: None,
            company,
            ticker: None,
            exchange: None,
            status: ResolutionStatus::Unresolved,
            source_uri: None,
            path: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        self.status == ResolutionStatus::Unresolved
    }
}
