//! Knowledge-graph endpoint configuration.

use serde::{Deserialize, Serialize};

fn default_endpoint() -> String {
    "https://www.wikidata.org/w/api.php".to_string()
}

fn default_user_agent() -> String {
    concat!("sponsorlink/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

/// Default number of ranked search hits requested per term.
const fn default_search_limit() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GraphConfig {
    /// Wikidata action API endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// User-Agent sent on every request. Public Wikimedia APIs require an
    /// identifying value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum ranked hits requested from entity search.
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            search_limit: default_search_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_wikidata() {
        let config = GraphConfig::default();
        assert_eq!(config.endpoint, "https://www.wikidata.org/w/api.php");
        assert!(config.user_agent.starts_with("sponsorlink/"));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.search_limit, 5);
    }
}
