//! `splk resolve` - batch-resolve industry sponsors from a trial
//! registry dump.

use std::fs::File;

use anyhow::Context;
use spl_core::GraphService;
use spl_engine::ResolutionEngine;

use crate::cli::{GlobalFlags, ResolveArgs};
use crate::context::AppContext;
use crate::progress::Progress;
use crate::{batch, input, output};

pub async fn handle(args: &ResolveArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    run(args, &ctx.engine, ctx.concurrency(args.concurrency), flags.quiet).await
}

async fn run<S: GraphService>(
    args: &ResolveArgs,
    engine: &ResolutionEngine<S>,
    concurrency: usize,
    quiet: bool,
) -> anyhow::Result<()> {
    let rows = input::read_sponsors(&args.input)?;
    let queries = input::industry_queries(rows, args.limit, args.filter.as_deref());
    tracing::info!(count = queries.len(), "resolving industry sponsors");

    let out_file = File::create(&args.output)
        .with_context(|| format!("failed to create output file {}", args.output.display()))?;
    let mut writer = output::ResolveWriter::new(out_file)?;

    let mut unresolved = match &args.unresolved_output {
        Some(path) => {
            let file = File::create(path).with_context(|| {
                format!("failed to create unresolved output file {}", path.display())
            })?;
            Some(output::UnresolvedWriter::new(file)?)
        }
        None => None,
    };

    let progress = Progress::bar(queries.len() as u64, "resolving sponsors", !quiet);

    let mut misses = 0_usize;
    let total = queries.len();
    batch::run(engine, queries, concurrency, |result| {
        if result.is_unresolved() {
            misses += 1;
            if let Some(writer) = unresolved.as_mut() {
                writer.write(&result.query)?;
            }
        }
        writer.write(&result)?;
        progress.set_message(&result.query.raw_name);
        progress.inc(1);
        Ok(())
    })
    .await?;

    progress.finish_ok("done");
    tracing::info!(
        total,
        misses,
        cache_entries = engine.cache().len(),
        "resolution batch finished"
    );
    Ok(())
}
