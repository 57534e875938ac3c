//! Environment variable mapping through the figment Env provider.

use figment::{
    Figment, Jail,
    providers::{Env, Serialized},
};
use spl_config::SplConfig;

#[test]
fn env_var_overrides_default() {
    Jail::expect_with(|jail| {
        jail.set_env("SPONSORLINK_RESOLVER__MAX_HOPS", "4");

        // No TOML file -- just defaults + env
        let config: SplConfig = Figment::from(Serialized::defaults(SplConfig::default()))
            .merge(Env::prefixed("SPONSORLINK_").split("__"))
            .extract()?;

        assert_eq!(config.resolver.max_hops, 4);
        Ok(())
    });
}

/// Documents the figment gotcha: typo'd env var keys are silently ignored.
#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("SPONSORLINK_GRAPH__ENDPOINTT", "http://typo/w/api.php");

        let config: SplConfig = Figment::from(Serialized::defaults(SplConfig::default()))
            .merge(Env::prefixed("SPONSORLINK_").split("__"))
            .extract()?;

        assert_eq!(
            config.graph.endpoint, "https://www.wikidata.org/w/api.php",
            "typo'd env var should be silently ignored by figment"
        );
        Ok(())
    });
}

/// Verify that figment's Env provider correctly maps nested SPONSORLINK_*
/// vars through the full provider chain (defaults -> env).
#[test]
fn full_env_provider_chain() {
    Jail::expect_with(|jail| {
        jail.set_env("SPONSORLINK_GRAPH__ENDPOINT", "http://jail/w/api.php");
        jail.set_env("SPONSORLINK_GRAPH__USER_AGENT", "jail-agent/1.0");
        jail.set_env("SPONSORLINK_GRAPH__TIMEOUT_SECS", "12");
        jail.set_env("SPONSORLINK_RETRY__MAX_ATTEMPTS", "6");
        jail.set_env("SPONSORLINK_RETRY__JITTER", "false");
        jail.set_env("SPONSORLINK_RESOLVER__CONCURRENCY", "2");

        let config: SplConfig = Figment::from(Serialized::defaults(SplConfig::default()))
            .merge(Env::prefixed("SPONSORLINK_").split("__"))
            .extract()?;

        assert_eq!(config.graph.endpoint, "http://jail/w/api.php");
        assert_eq!(config.graph.user_agent, "jail-agent/1.0");
        assert_eq!(config.graph.timeout_secs, 12);
        assert_eq!(config.retry.max_attempts, 6);
        assert!(!config.retry.jitter);
        assert_eq!(config.resolver.concurrency, 2);
        Ok(())
    });
}
