//! Binary entry point for moviegraph.
//!
//! This binary provides the CLI and HTTP server for the movie graph API.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::Parser;
use moviegraph::cli::{Cli, Commands, ConfigCommand, QueryCommand, ServeCommand};
use moviegraph::config::MoviegraphConfig;
use moviegraph::observability::{self, InitOptions};
use moviegraph::storage::{GraphExecutor, RecordedExecutor};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match MoviegraphConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let _observability = match observability::init_from_config(
        &config,
        InitOptions {
            verbose: cli.verbose,
            metrics_expose: cli.command.is_serve(),
        },
    ) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize observability: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Picks the executor and runs the selected command.
async fn run(cli: Cli, config: MoviegraphConfig) -> anyhow::Result<()> {
    if let Commands::Config { show } = cli.command {
        return cmd_config(&config, show);
    }

    match &cli.fixtures {
        Some(path) => {
            let executor = RecordedExecutor::from_file(path)
                .with_context(|| format!("loading fixtures from {}", path.display()))?;
            tracing::info!(path = %path.display(), "Replaying recorded fixtures");
            dispatch(cli.command, Arc::new(executor), config).await
        },
        None => {
            let executor = connect(&config).await?;
            dispatch(cli.command, Arc::new(executor), config).await
        },
    }
}

#[cfg(feature = "neo4j")]
async fn connect(config: &MoviegraphConfig) -> anyhow::Result<moviegraph::storage::Neo4jExecutor> {
    moviegraph::storage::Neo4jExecutor::connect(&config.neo4j)
        .await
        .with_context(|| format!("connecting to {}", config.neo4j.uri))
}

#[cfg(not(feature = "neo4j"))]
async fn connect(_config: &MoviegraphConfig) -> anyhow::Result<RecordedExecutor> {
    Err(moviegraph::Error::FeatureNotEnabled(
        "neo4j (rebuild with --features neo4j, or pass --fixtures)".to_string(),
    )
    .into())
}

async fn dispatch<E: GraphExecutor + 'static>(
    command: Commands,
    executor: Arc<E>,
    config: MoviegraphConfig,
) -> anyhow::Result<()> {
    if let Commands::Serve { port } = command {
        ServeCommand::new(config, port).execute(executor).await?;
        return Ok(());
    }

    let json = QueryCommand::new(&config.presentation)
        .execute(&*executor, &command)
        .await?;
    println!("{json}");
    Ok(())
}

/// Config command.
fn cmd_config(config: &MoviegraphConfig, show: bool) -> anyhow::Result<()> {
    if show {
        print!("{}", ConfigCommand::new().render(config)?);
    } else {
        println!("Use --show to display configuration");
    }
    Ok(())
}
