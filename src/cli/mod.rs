//! CLI command implementations.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `serve` | Run the HTTP API |
//! | `movies` | List movies, optionally those one actor appeared in |
//! | `movie` | Show one movie by id or title |
//! | `people` | List people, optionally the cast of one movie |
//! | `person` | Show one person by id or name, or search by name |
//! | `bacon` | Shortest acting path between two people |
//! | `config` | Show the effective configuration |
//!
//! Query commands print JSON to stdout. They run against Neo4j unless
//! `--fixtures` points at a recorded fixture file.
//!
//! # Example Usage
//!
//! ```bash
//! moviegraph serve --port 8080
//! moviegraph movie 603 --output d3
//! moviegraph person --search keanu
//! moviegraph --fixtures demo.json bacon "Keanu Reeves" "Kevin Bacon"
//! ```

mod config;
mod query;
mod serve;

pub use config::ConfigCommand;
pub use query::QueryCommand;
pub use serve::ServeCommand;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Moviegraph - read-only API over a movie/actor graph.
#[derive(Debug, Parser)]
#[command(name = "moviegraph")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Replay recorded query results instead of connecting to Neo4j.
    #[arg(long, global = true, env = "MOVIEGRAPH_FIXTURES")]
    pub fixtures: Option<PathBuf>,

    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API.
    Serve {
        /// Port to listen on.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List movies.
    Movies {
        /// Only movies this person (id) acted in.
        #[arg(long)]
        actor: Option<String>,

        /// Output mode: default or d3.
        #[arg(short, long, default_value = "default")]
        output: String,
    },

    /// Show one movie.
    Movie {
        /// Movie id.
        #[arg(required_unless_present = "name", conflicts_with = "name")]
        id: Option<String>,

        /// Title substring to look up instead of an id.
        #[arg(long)]
        name: Option<String>,

        /// Output mode: default or d3.
        #[arg(short, long, default_value = "default")]
        output: String,
    },

    /// List people.
    People {
        /// Only people who acted in this movie (id).
        #[arg(long)]
        movie: Option<String>,

        /// Output mode: default or d3.
        #[arg(short, long, default_value = "default")]
        output: String,
    },

    /// Show one person, or search people by name.
    Person {
        /// Person id.
        #[arg(required_unless_present_any = ["name", "search"], conflicts_with_all = ["name", "search"])]
        id: Option<String>,

        /// Exact name to look up.
        #[arg(long, conflicts_with = "search")]
        name: Option<String>,

        /// Name substring to search for.
        #[arg(long)]
        search: Option<String>,

        /// Output mode: default or d3.
        #[arg(short, long, default_value = "default")]
        output: String,
    },

    /// Shortest acting path between two people.
    Bacon {
        /// First person's name.
        name1: String,

        /// Second person's name.
        name2: String,

        /// Output mode: default or d3.
        #[arg(short, long, default_value = "default")]
        output: String,
    },

    /// Show configuration.
    Config {
        /// Print the effective configuration.
        #[arg(long)]
        show: bool,
    },
}

impl Commands {
    /// Returns `true` for the long-running server command.
    #[must_use]
    pub const fn is_serve(&self) -> bool {
        matches!(self, Self::Serve { .. })
    }
}
