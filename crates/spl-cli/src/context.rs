//! Application context: configuration plus the resolution engine built
//! from it.

use std::time::Duration;

use anyhow::Context;
use figment::providers::{Format, Toml};
use spl_config::SplConfig;
use spl_engine::{ResolutionEngine, TraversalLimits};
use spl_graph::{ClientOptions, RetryPolicy, WikidataClient};

use crate::cli::GlobalFlags;

/// Load layered configuration, with the `--config` file (when given)
/// merged above the default TOML layers but below env vars.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SplConfig> {
    let _ = dotenvy::dotenv();

    let mut figment = SplConfig::figment();
    if let Some(path) = &flags.config {
        figment = figment.merge(Toml::file(path));
    }
    figment
        .extract()
        .context("failed to load sponsorlink configuration")
}

/// Everything a command handler needs for one run.
pub struct AppContext {
    pub config: SplConfig,
    pub engine: ResolutionEngine<WikidataClient>,
}

impl AppContext {
    #[must_use]
    pub fn init(config: SplConfig) -> Self {
        let options = ClientOptions {
            endpoint: config.graph.endpoint.clone(),
            user_agent: config.graph.user_agent.clone(),
            timeout: Duration::from_secs(config.graph.timeout_secs),
            search_limit: config.graph.search_limit,
            retry: RetryPolicy {
                max_attempts: config.retry.max_attempts,
                base_delay: Duration::from_millis(config.retry.base_delay_ms),
                jitter: config.retry.jitter,
            },
        };
        let limits = TraversalLimits {
            max_hops: config.resolver.max_hops,
        };
        let engine = ResolutionEngine::new(WikidataClient::new(options), limits);
        Self { config, engine }
    }

    /// Effective in-flight resolution count for this run.
    #[must_use]
    pub fn concurrency(&self, cli_override: Option<usize>) -> usize {
        cli_override
            .unwrap_or_else(|| self.config.resolver.effective_concurrency())
            .max(1)
    }
}
