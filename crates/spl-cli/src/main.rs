use clap::Parser;

mod batch;
mod cli;
mod commands;
mod context;
mod input;
mod openfda;
mod output;
mod progress;
#[cfg(test)]
mod testgraph;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("splk error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let config = context::load_config(&flags)?;
    let ctx = context::AppContext::init(config);

    match cli.command {
        cli::Commands::Resolve(args) => commands::resolve::handle(&args, &ctx, &flags).await,
        cli::Commands::Extract(args) => commands::extract::handle(&args, &ctx, &flags).await,
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SPONSORLINK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
