//! Bounded-concurrency batch driver.
//!
//! Resolutions run `concurrency` at a time but complete in input order,
//! so each result can be written and flushed the moment it arrives. The
//! engine's cache is shared across all in-flight resolutions.

use futures::{StreamExt, stream};
use spl_core::{GraphService, ResolutionResult, SponsorQuery};
use spl_engine::ResolutionEngine;

pub async fn run<S, F>(
    engine: &ResolutionEngine<S>,
    queries: Vec<SponsorQuery>,
    concurrency: usize,
    mut on_result: F,
) -> anyhow::Result<()>
where
    S: GraphService,
    F: FnMut(ResolutionResult) -> anyhow::Result<()>,
{
    let mut results = stream::iter(queries)
        .map(|query| engine.resolve(query))
        .buffered(concurrency.max(1));

    while let Some(result) = results.next().await {
        on_result(result)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use spl_engine::TraversalLimits;

    use super::*;
    use crate::testgraph::StubGraph;

    #[tokio::test]
    async fn results_arrive_in_input_order() {
        let names = ["Alpha Bio", "Beta Bio", "Gamma Bio"];
        let engine = ResolutionEngine::new(
            StubGraph::with_sponsors(&names),
            TraversalLimits::default(),
        );
        let queries: Vec<SponsorQuery> = names
            .iter()
            .enumerate()
            .map(|(i, name)| SponsorQuery::new(format!("NCT{i:03}"), *name))
            .collect();

        let mut seen = Vec::new();
        run(&engine, queries, 2, |result| {
            seen.push(result.query.key.clone());
            Ok(())
        })
        .await
        .expect("batch runs");

        assert_eq!(seen, vec!["NCT000", "NCT001", "NCT002"]);
    }

    #[tokio::test]
    async fn callback_error_stops_the_batch() {
        let engine = ResolutionEngine::new(
            StubGraph::with_sponsors(&["Alpha Bio"]),
            TraversalLimits::default(),
        );
        let queries = vec![
            SponsorQuery::new("NCT000", "Alpha Bio"),
            SponsorQuery::new("NCT001", "Alpha Bio"),
        ];

        let mut calls = 0;
        let outcome = run(&engine, queries, 1, |_| {
            calls += 1;
            anyhow::bail!("disk full")
        })
        .await;

        assert!(outcome.is_err());
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn zero_concurrency_is_clamped() {
        let engine = ResolutionEngine::new(
            StubGraph::with_sponsors(&["Alpha Bio"]),
            TraversalLimits::default(),
        );
        let queries = vec![SponsorQuery::new("NCT000", "Alpha Bio")];

        let mut count = 0;
        run(&engine, queries, 0, |_| {
            count += 1;
            Ok(())
        })
        .await
        .expect("batch runs");
        assert_eq!(count, 1);
    }
}
