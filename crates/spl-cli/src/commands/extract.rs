//! `splk extract` - flatten an OpenFDA drugsfda dump into product rows
//! joined with each sponsor's resolution.
//!
//! Each unique sponsor is resolved exactly once; its resolution is then
//! repeated across every product row it owns.

use std::fs::File;

use anyhow::Context;
use spl_core::{GraphService, SponsorQuery};
use spl_engine::ResolutionEngine;

use crate::cli::{ExtractArgs, GlobalFlags};
use crate::context::AppContext;
use crate::progress::Progress;
use crate::{batch, openfda, output};

pub async fn handle(args: &ExtractArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    run(args, &ctx.engine, ctx.concurrency(args.concurrency), flags.quiet).await
}

async fn run<S: GraphService>(
    args: &ExtractArgs,
    engine: &ResolutionEngine<S>,
    concurrency: usize,
    quiet: bool,
) -> anyhow::Result<()> {
    let dump = openfda::read_dump(&args.input)?;
    let mut groups = openfda::group_by_sponsor(dump);
    tracing::info!(sponsors = groups.len(), "extracted product groups");

    if let Some(needle) = &args.filter {
        let needle = needle.to_lowercase();
        groups.retain(|(sponsor, _)| sponsor.to_lowercase().contains(&needle));
    }
    if let Some(limit) = args.limit {
        groups.truncate(limit);
    }

    // One query per unique sponsor; the sponsor name doubles as the key.
    let queries: Vec<SponsorQuery> = groups
        .iter()
        .map(|(sponsor, _)| SponsorQuery::new(sponsor.clone(), sponsor.clone()))
        .collect();

    let out_file = File::create(&args.output)
        .with_context(|| format!("failed to create output file {}", args.output.display()))?;
    let mut writer = output::ProductWriter::new(out_file)?;

    let mut unresolved = match &args.unresolved_output {
        Some(path) => {
            let file = File::create(path).with_context(|| {
                format!("failed to create unresolved output file {}", path.display())
            })?;
            Some(output::UnresolvedWriter::new(file)?)
        }
        None => None,
    };

    let progress = Progress::bar(groups.len() as u64, "resolving sponsors", !quiet);

    // Results complete in input order, so the product groups can be
    // consumed in lockstep with them.
    let mut group_iter = groups.into_iter();
    batch::run(engine, queries, concurrency, |result| {
        let (sponsor, products) = group_iter
            .next()
            .context("resolution result without a matching sponsor group")?;
        debug_assert_eq!(sponsor, result.query.raw_name);

        if result.is_unresolved() {
            if let Some(writer) = unresolved.as_mut() {
                writer.write(&result.query)?;
            }
        }
        for product in &products {
            writer.write(product, &result)?;
        }
        progress.set_message(&sponsor);
        progress.inc(1);
        Ok(())
    })
    .await?;

    progress.finish_ok("done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use spl_engine::TraversalLimits;

    use super::*;
    use crate::testgraph::StubGraph;

    const DUMP: &str = r#"{
        "results": [
            {
                "sponsor_name": "Alpha Bio",
                "products": [
                    {
                        "brand_name": "ALPHACIN",
                        "active_ingredients": [{"name": "ALPHACILLIN", "strength": "10MG"}],
                        "marketing_status": "Prescription",
                        "dosage_form": "TABLET"
                    }
                ]
            },
            {
                "sponsor_name": "Zyxxara Vantabio",
                "products": [
                    {
                        "brand_name": "ZYXXATAB",
                        "active_ingredients": [{"name": "ZYXXARIN", "strength": "5MG"}],
                        "marketing_status": "Discontinued",
                        "dosage_form": "TABLET"
                    }
                ]
            }
        ]
    }"#;

    #[tokio::test]
    async fn unresolved_sponsors_reach_the_diagnostic_stream() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("drugsfda.json");
        std::fs::write(&input, DUMP).expect("input written");
        let output = dir.path().join("products.csv");
        let diagnostics = dir.path().join("unresolved.csv");

        let args = ExtractArgs {
            input,
            output: output.clone(),
            unresolved_output: Some(diagnostics.clone()),
            limit: None,
            filter: None,
            concurrency: None,
        };
        let engine = ResolutionEngine::new(
            StubGraph::with_sponsors(&["Alpha Bio"]),
            TraversalLimits::default(),
        );

        run(&args, &engine, 2, true).await.expect("extract runs");

        let rows = std::fs::read_to_string(&output).expect("output readable");
        let lines: Vec<&str> = rows.lines().collect();
        assert_eq!(lines.len(), 3, "header plus one product per sponsor: {rows}");
        assert!(lines[1].starts_with("ALPHACIN,"), "{rows}");
        assert!(lines[1].contains(",Active,"), "{rows}");
        assert!(lines[2].starts_with("ZYXXATAB,"), "{rows}");
        assert!(lines[2].contains(",Unresolved,"), "{rows}");

        let misses = std::fs::read_to_string(&diagnostics).expect("diagnostics readable");
        assert_eq!(misses, "key,sponsor_name\nZyxxara Vantabio,Zyxxara Vantabio\n");
    }
}
