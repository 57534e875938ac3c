//! Wikidata action-API client.
//!
//! Two endpoints back the [`spl_core::GraphService`] contract:
//! `wbsearchentities` for ranked label/alias search and `wbgetentities`
//! for property fetches. Claims are mapped onto the fixed-shape
//! [`Entity`] record: P1366/P156 (replaced by / followed by) become the
//! successor edge, P749 (parent organization, with P127 owned-by as
//! fallback) the parent edge, P249 the ticker, P414 the exchange listing,
//! and P576 (dissolved) marks the entity historical.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde::Deserialize;
use spl_core::{Entity, EntityId, GraphError, GraphService};

use crate::http::{check_response, transport_error};
use crate::retry::RetryPolicy;

const WIKIDATA_API: &str = "https://www.wikidata.org/w/api.php";

const P_REPLACED_BY: &str = "P1366";
const P_FOLLOWED_BY: &str = "P156";
const P_PARENT_ORG: &str = "P749";
const P_OWNED_BY: &str = "P127";
const P_TICKER: &str = "P249";
const P_EXCHANGE: &str = "P414";
const P_DISSOLVED: &str = "P576";

/// Connection and behavior settings for [`WikidataClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub endpoint: String,
    /// Wikidata policy requires an identifying User-Agent.
    pub user_agent: String,
    pub timeout: Duration,
    /// Max hits requested per search term.
    pub search_limit: u32,
    pub retry: RetryPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: WIKIDATA_API.to_string(),
            user_agent: "sponsorlink/0.1 (https://github.com/sponsorlink)".to_string(),
            timeout: Duration::from_secs(30),
            search_limit: 5,
            retry: RetryPolicy::default(),
        }
    }
}

/// HTTP client for the Wikidata action API.
pub struct WikidataClient {
    http: reqwest::Client,
    endpoint: String,
    search_limit: u32,
    retry: RetryPolicy,
    /// Exchange entities (NYSE, Nasdaq, ...) recur constantly; their
    /// labels are memoized here instead of round-tripping per company.
    exchange_labels: Mutex<HashMap<EntityId, String>>,
}

impl Default for WikidataClient {
    fn default() -> Self {
        Self::new(ClientOptions::default())
    }
}

impl WikidataClient {
    /// Create a client with the given options.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(options: ClientOptions) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(options.user_agent)
                .timeout(options.timeout)
                .build()
                .expect("reqwest client should build"),
            endpoint: options.endpoint,
            search_limit: options.search_limit,
            retry: options.retry,
            exchange_labels: Mutex::new(HashMap::new()),
        }
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        purpose: &'static str,
    ) -> Result<T, GraphError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.attempt::<T>(&url).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && self.retry.allows_retry(attempt) => {
                    let delay = self.retry.delay_for(attempt, &err);
                    tracing::warn!(
                        purpose,
                        attempt,
                        error = %err,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "graph query failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn attempt<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, GraphError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;
        let resp = check_response(resp).await?;
        resp.json::<T>()
            .await
            .map_err(|e| GraphError::Malformed(e.to_string()))
    }

    fn entities_url(&self, id: &EntityId, props: &str) -> String {
        format!(
            "{}?action=wbgetentities&ids={}&props={}&languages=en&format=json",
            self.endpoint,
            urlencoding::encode(id.as_str()),
            urlencoding::encode(props),
        )
    }

    async fn fetch_doc(&self, id: &EntityId, props: &str) -> Result<EntityDoc, GraphError> {
        let response: EntitiesResponse =
            self.request(self.entities_url(id, props), "entities").await?;
        if let Some(error) = response.error {
            if error.code.starts_with("no-such-entity") {
                return Err(GraphError::NotFound { id: id.to_string() });
            }
            return Err(GraphError::Malformed(format!(
                "{}: {}",
                error.code, error.info
            )));
        }
        let doc = response
            .entities
            .remove_doc(id)
            .ok_or_else(|| GraphError::NotFound { id: id.to_string() })?;
        if doc.missing.is_some() {
            return Err(GraphError::NotFound { id: id.to_string() });
        }
        Ok(doc)
    }

    /// English label of an entity, memoized; used for exchange names.
    async fn exchange_label(&self, id: &EntityId) -> Result<String, GraphError> {
        if let Some(label) = self.memoized_exchange_label(id) {
            return Ok(label);
        }
        let doc = self.fetch_doc(id, "labels").await?;
        let label = doc.english_label().unwrap_or_else(|| id.to_string());
        self.exchange_labels
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(id.clone(), label.clone());
        Ok(label)
    }

    fn memoized_exchange_label(&self, id: &EntityId) -> Option<String> {
        self.exchange_labels
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// The action API reports some failures inside a 200 body; surface
    /// them instead of passing off the empty hit list as a miss.
    fn search_hits(response: SearchResponse) -> Result<Vec<EntityId>, GraphError> {
        if let Some(error) = response.error {
            return Err(GraphError::Malformed(format!(
                "{}: {}",
                error.code, error.info
            )));
        }
        Ok(response
            .search
            .into_iter()
            .map(|hit| EntityId::new(hit.id))
            .collect())
    }
}

impl GraphService for WikidataClient {
    async fn find_direct(&self, id: &EntityId) -> Result<Entity, GraphError> {
        self.fetch_properties(id).await
    }

    async fn search(&self, term: &str) -> Result<Vec<EntityId>, GraphError> {
        let url = format!(
            "{}?action=wbsearchentities&search={}&language=en&type=item&limit={}&format=json",
            self.endpoint,
            urlencoding::encode(term),
            self.search_limit,
        );
        let response: SearchResponse = self.request(url, "search").await?;
        Self::search_hits(response)
    }

    async fn fetch_properties(&self, id: &EntityId) -> Result<Entity, GraphError> {
        let doc = self.fetch_doc(id, "labels|aliases|claims").await?;
        let (mut entity, exchange_id) = doc.into_entity(id);
        if let Some(exchange_id) = exchange_id {
            match self.exchange_label(&exchange_id).await {
                Ok(label) => entity.exchange = Some(label),
                Err(err) => {
                    // A broken exchange item should not sink the company;
                    // the QID is still a usable listing marker.
                    tracing::debug!(%exchange_id, error = %err, "exchange label lookup failed");
                    entity.exchange = Some(exchange_id.to_string());
                }
            }
        }
        Ok(entity)
    }
}

// ── Wire format ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    search: Vec<SearchHit>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Default, Deserialize)]
struct EntitiesResponse {
    #[serde(default)]
    entities: EntityDocs,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
struct EntityDocs(HashMap<String, EntityDoc>);

impl EntityDocs {
    /// Pull the doc for `id`, tolerating redirect responses keyed by the
    /// target QID instead of the requested one.
    fn remove_doc(mut self, id: &EntityId) -> Option<EntityDoc> {
        if let Some(doc) = self.0.remove(id.as_str()) {
            return Some(doc);
        }
        let mut docs: Vec<_> = self.0.drain().collect();
        docs.sort_by(|(a, _), (b, _)| a.cmp(b));
        docs.into_iter().next().map(|(_, doc)| doc)
    }
}

#[derive(Debug, Deserialize)]
struct EntityDoc {
    #[serde(default)]
    missing: Option<serde_json::Value>,
    #[serde(default)]
    labels: HashMap<String, LangValue>,
    #[serde(default)]
    aliases: HashMap<String, Vec<LangValue>>,
    #[serde(default)]
    claims: HashMap<String, Vec<Claim>>,
}

#[derive(Debug, Deserialize)]
struct LangValue {
    value: String,
}

#[derive(Debug, Deserialize)]
struct Claim {
    mainsnak: Snak,
    #[serde(default)]
    qualifiers: HashMap<String, Vec<Snak>>,
}

#[derive(Debug, Default, Deserialize)]
struct Snak {
    #[serde(default)]
    datavalue: Option<DataValue>,
}

#[derive(Debug, Deserialize)]
struct DataValue {
    value: serde_json::Value,
}

impl Snak {
    fn item_id(&self) -> Option<EntityId> {
        self.datavalue
            .as_ref()?
            .value
            .get("id")?
            .as_str()
            .map(EntityId::from)
    }

    fn string(&self) -> Option<String> {
        self.datavalue
            .as_ref()?
            .value
            .as_str()
            .map(str::to_string)
    }
}

impl EntityDoc {
    fn english_label(&self) -> Option<String> {
        self.labels.get("en").map(|l| l.value.clone())
    }

    fn first_item(&self, prop: &str) -> Option<EntityId> {
        self.claims
            .get(prop)?
            .iter()
            .find_map(|claim| claim.mainsnak.item_id())
    }

    fn first_string(&self, prop: &str) -> Option<String> {
        self.claims
            .get(prop)?
            .iter()
            .find_map(|claim| claim.mainsnak.string())
    }

    fn has(&self, prop: &str) -> bool {
        self.claims.get(prop).is_some_and(|c| !c.is_empty())
    }

    /// Ticker qualifier on an exchange-listing claim, e.g. NYSE listing
    /// qualified with P249 "PFE".
    fn listing_qualifier_ticker(&self) -> Option<String> {
        self.claims.get(P_EXCHANGE)?.iter().find_map(|claim| {
            claim
                .qualifiers
                .get(P_TICKER)?
                .iter()
                .find_map(Snak::string)
        })
    }

    /// Map the raw doc onto the domain record. Returns the exchange item
    /// id separately; the caller resolves its label.
    fn into_entity(self, id: &EntityId) -> (Entity, Option<EntityId>) {
        let successor = self
            .first_item(P_REPLACED_BY)
            .or_else(|| self.first_item(P_FOLLOWED_BY));
        let is_historical = successor.is_some() || self.has(P_DISSOLVED);
        let parent = self
            .first_item(P_PARENT_ORG)
            .or_else(|| self.first_item(P_OWNED_BY));
        let ticker = self
            .first_string(P_TICKER)
            .or_else(|| self.listing_qualifier_ticker());
        let exchange_id = self.first_item(P_EXCHANGE);

        let aliases = self
            .aliases
            .get("en")
            .map(|values| values.iter().map(|v| v.value.clone()).collect())
            .unwrap_or_default();

        let entity = Entity {
            id: id.clone(),
            label: self.english_label().unwrap_or_else(|| id.to_string()),
            aliases,
            is_historical,
            successor_id: successor,
            parent_id: parent,
            ticker,
            exchange: None,
        };
        (entity, exchange_id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SEARCH_FIXTURE: &str = r#"{
        "searchinfo": { "search": "wyeth" },
        "search": [
            { "id": "Q1423380", "label": "Wyeth", "description": "pharmaceutical company" },
            { "id": "Q52858421", "label": "Wyeth Laboratories", "description": "manufacturer" }
        ],
        "success": 1
    }"#;

    const HISTORICAL_FIXTURE: &str = r#"{
        "entities": {
            "Q1423380": {
                "type": "item",
                "id": "Q1423380",
                "labels": { "en": { "language": "en", "value": "Wyeth" } },
                "aliases": { "en": [
                    { "language": "en", "value": "American Home Products" }
                ] },
                "claims": {
                    "P1366": [ { "mainsnak": { "snaktype": "value", "datavalue": {
                        "value": { "entity-type": "item", "id": "Q206921" }, "type": "wikibase-entityid"
                    } } } ],
                    "P576": [ { "mainsnak": { "snaktype": "value", "datavalue": {
                        "value": { "time": "+2009-10-15T00:00:00Z" }, "type": "time"
                    } } } ]
                }
            }
        },
        "success": 1
    }"#;

    const PUBLIC_FIXTURE: &str = r#"{
        "entities": {
            "Q206921": {
                "type": "item",
                "id": "Q206921",
                "labels": { "en": { "language": "en", "value": "Pfizer Inc." } },
                "claims": {
                    "P249": [ { "mainsnak": { "snaktype": "value", "datavalue": {
                        "value": "PFE", "type": "string"
                    } } } ],
                    "P414": [ {
                        "mainsnak": { "snaktype": "value", "datavalue": {
                            "value": { "entity-type": "item", "id": "Q13677" }, "type": "wikibase-entityid"
                        } },
                        "qualifiers": { "P249": [ { "snaktype": "value", "datavalue": {
                            "value": "PFE", "type": "string"
                        } } ] }
                    } ]
                }
            }
        },
        "success": 1
    }"#;

    const SUBSIDIARY_FIXTURE: &str = r#"{
        "entities": {
            "Q1142456": {
                "type": "item",
                "id": "Q1142456",
                "labels": { "en": { "language": "en", "value": "Janssen Pharmaceutica" } },
                "claims": {
                    "P127": [ { "mainsnak": { "snaktype": "value", "datavalue": {
                        "value": { "entity-type": "item", "id": "Q333718" }, "type": "wikibase-entityid"
                    } } } ]
                }
            }
        },
        "success": 1
    }"#;

    const MISSING_FIXTURE: &str = r#"{
        "entities": { "Q99999999999": { "id": "Q99999999999", "missing": "" } },
        "success": 1
    }"#;

    const SEARCH_ERROR_FIXTURE: &str = r#"{
        "error": {
            "code": "param-missing",
            "info": "The search parameter must be set."
        },
        "servedby": "mw1380"
    }"#;

    #[test]
    fn search_response_preserves_rank_order() {
        let parsed: SearchResponse = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let hits = WikidataClient::search_hits(parsed).unwrap();
        assert_eq!(
            hits,
            vec![EntityId::from("Q1423380"), EntityId::from("Q52858421")]
        );
    }

    #[test]
    fn api_error_in_search_body_is_surfaced() {
        let parsed: SearchResponse = serde_json::from_str(SEARCH_ERROR_FIXTURE).unwrap();
        match WikidataClient::search_hits(parsed) {
            Err(GraphError::Malformed(msg)) => {
                assert!(msg.contains("param-missing"), "{msg}");
            }
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn historical_entity_maps_successor_and_dissolution() {
        let parsed: EntitiesResponse = serde_json::from_str(HISTORICAL_FIXTURE).unwrap();
        let id = EntityId::from("Q1423380");
        let doc = parsed.entities.remove_doc(&id).unwrap();
        let (entity, exchange_id) = doc.into_entity(&id);

        assert_eq!(entity.label, "Wyeth");
        assert_eq!(entity.aliases, vec!["American Home Products"]);
        assert!(entity.is_historical);
        assert_eq!(entity.successor_id, Some(EntityId::from("Q206921")));
        assert!(entity.ticker.is_none());
        assert!(exchange_id.is_none());
    }

    #[test]
    fn public_entity_maps_ticker_and_exchange() {
        let parsed: EntitiesResponse = serde_json::from_str(PUBLIC_FIXTURE).unwrap();
        let id = EntityId::from("Q206921");
        let doc = parsed.entities.remove_doc(&id).unwrap();
        let (entity, exchange_id) = doc.into_entity(&id);

        assert_eq!(entity.label, "Pfizer Inc.");
        assert_eq!(entity.ticker.as_deref(), Some("PFE"));
        assert_eq!(exchange_id, Some(EntityId::from("Q13677")));
        assert!(!entity.is_historical);
        assert!(entity.is_public());
    }

    #[test]
    fn listing_qualifier_backfills_missing_direct_ticker() {
        let stripped = PUBLIC_FIXTURE.replacen(
            r#""P249": [ { "mainsnak": { "snaktype": "value", "datavalue": {
                        "value": "PFE", "type": "string"
                    } } } ],"#,
            "",
            1,
        );
        let parsed: EntitiesResponse = serde_json::from_str(&stripped).unwrap();
        let id = EntityId::from("Q206921");
        let (entity, _) = parsed.entities.remove_doc(&id).unwrap().into_entity(&id);
        assert_eq!(entity.ticker.as_deref(), Some("PFE"));
    }

    #[test]
    fn owned_by_is_parent_fallback() {
        let parsed: EntitiesResponse = serde_json::from_str(SUBSIDIARY_FIXTURE).unwrap();
        let id = EntityId::from("Q1142456");
        let (entity, _) = parsed.entities.remove_doc(&id).unwrap().into_entity(&id);
        assert_eq!(entity.parent_id, Some(EntityId::from("Q333718")));
        assert!(!entity.is_public());
    }

    #[test]
    fn missing_marker_is_detected() {
        let parsed: EntitiesResponse = serde_json::from_str(MISSING_FIXTURE).unwrap();
        let id = EntityId::from("Q99999999999");
        let doc = parsed.entities.remove_doc(&id).unwrap();
        assert!(doc.missing.is_some());
    }

    #[test]
    fn unlabeled_entity_falls_back_to_qid() {
        let parsed: EntitiesResponse = serde_json::from_str(MISSING_FIXTURE).unwrap();
        let id = EntityId::from("Q99999999999");
        let (entity, _) = parsed.entities.remove_doc(&id).unwrap().into_entity(&id);
        assert_eq!(entity.label, "Q99999999999");
    }

    #[test]
    fn search_url_encodes_the_term() {
        let client = WikidataClient::default();
        let url = format!(
            "{}?action=wbsearchentities&search={}&language=en&type=item&limit={}&format=json",
            client.endpoint,
            urlencoding::encode("Merck & Co."),
            client.search_limit,
        );
        assert!(url.contains("Merck%20%26%20Co."));
    }

    #[test]
    fn client_options_default_targets_wikidata() {
        let options = ClientOptions::default();
        assert_eq!(options.endpoint, WIKIDATA_API);
        assert_eq!(options.search_limit, 5);
        assert_eq!(options.retry, RetryPolicy::default());
    }
}
