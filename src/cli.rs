use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reelsearch")]
#[command(author, version, about = "Movie and TV search across multiple metadata providers")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search all enabled providers and print the merged results
    Search {
        /// Title to search for
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP search server
    Start {
        /// Host to bind to (defaults to the config file's value)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the config file's value)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
