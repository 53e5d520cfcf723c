//! CLI entry point for the moviegraph writer.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use moviegraph_core::config::load_settings;
use moviegraph_graph::{BoltConnector, GraphConfig};

use moviegraph_writer::cli::Cli;
use moviegraph_writer::report::confirmation;
use moviegraph_writer::run::{run_write, verify};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .json()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Movie record write failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = load_settings(&cli.config)?;
    let graph_config = GraphConfig::try_from(&settings.neo4j)?;
    let request = cli.request()?;
    let country_edge = cli.country_edge_or(settings.writer.country_edge);

    let connector = BoltConnector::new(graph_config.clone());
    let record = run_write(&connector, &request, country_edge).await?;
    println!("{}", confirmation(&record)?);

    if cli.verify {
        let verification = verify(&graph_config, &record).await?;
        println!("{}", verification.summary());
    }

    Ok(())
}
