//! In-memory graph stub shared by batch and command handler tests.

use std::collections::HashMap;

use spl_core::{Entity, EntityId, GraphError, GraphService};

/// Minimal graph stub: each known sponsor name searches to one listed
/// entity, any other term misses.
pub struct StubGraph {
    entities: HashMap<EntityId, Entity>,
    searches: HashMap<String, EntityId>,
}

impl StubGraph {
    pub fn with_sponsors(names: &[&str]) -> Self {
        let mut entities = HashMap::new();
        let mut searches = HashMap::new();
        for (i, name) in names.iter().enumerate() {
            let id = EntityId::new(format!("Q{i}"));
            entities.insert(
                id.clone(),
                Entity {
                    id: id.clone(),
                    label: (*name).to_string(),
                    aliases: Vec::new(),
                    is_historical: false,
                    successor_id: None,
                    parent_id: None,
                    ticker: Some(format!("T{i}")),
                    exchange: Some("NYSE".to_string()),
                },
            );
            searches.insert((*name).to_string(), id);
        }
        Self { entities, searches }
    }
}

impl GraphService for StubGraph {
    async fn find_direct(&self, id: &EntityId) -> Result<Entity, GraphError> {
        self.fetch_properties(id).await
    }

    async fn search(&self, term: &str) -> Result<Vec<EntityId>, GraphError> {
        Ok(self.searches.get(term).cloned().into_iter().collect())
    }

    async fn fetch_properties(&self, id: &EntityId) -> Result<Entity, GraphError> {
        self.entities
            .get(id)
            .cloned()
            .ok_or_else(|| GraphError::NotFound { id: id.to_string() })
    }
}
