mod cli;

use reelsearch::{
    config,
    metadata::{AggregatedResult, SearchAggregator},
    server,
};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use reelsearch_common::SourceState;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;
    config.server.apply_overrides(host, port);
    config::validate_config(&config)?;

    tracing::info!("Starting Reelsearch server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

async fn search(
    query: &str,
    config_path: Option<&std::path::Path>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let aggregator = SearchAggregator::from_config(&config)?;
    let result = aggregator.aggregate(query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.records)?);
    } else {
        print_records(&result);
    }

    if verbose || result.is_partial() {
        print_sources(&result);
    }

    Ok(())
}

fn print_records(result: &AggregatedResult) {
    if result.records.is_empty() {
        println!("No results.");
        return;
    }

    for (i, record) in result.records.iter().enumerate() {
        print!("{:>3}. {}", i + 1, record.title);
        if let Some(ref imdb) = record.imdb_id {
            print!(" [{}]", imdb);
        }
        println!();
        if !record.plot.is_empty() {
            println!("     {}", record.plot);
        }
        if !record.actors.is_empty() {
            println!("     Cast: {}", record.actors.join(", "));
        }
        if let Some(ref stream) = record.stream_url {
            println!("     Stream: {}", stream);
        }
    }
}

// Provider status goes to stderr so `--json` output stays parseable.
fn print_sources(result: &AggregatedResult) {
    eprintln!("\nSources:");
    for source in &result.sources {
        let status = match source.state {
            SourceState::Ok => "✓",
            SourceState::Failed => "✗",
            SourceState::TimedOut => "⧗",
        };
        eprint!("  {} {} ({} results)", status, source.provider, source.count);
        if let Some(ref error) = source.error {
            eprint!(" - {}", error);
        }
        eprintln!();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            // Verbose mode: trace for reelsearch, debug for HTTP
            "reelsearch=trace,reelsearch_common=debug,tower_http=debug".to_string()
        } else {
            "reelsearch=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search { query, json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(search(&query, cli.config.as_deref(), json, cli.verbose))
        }
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("reelsearch {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::load_config_or_default(None)?
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Search timeout: {}s", config.search.timeout_secs);

    let providers = &config.providers;
    for (name, enabled, has_key) in [
        (
            "rotten_tomatoes",
            providers.rotten_tomatoes.enabled,
            !providers.rotten_tomatoes.api_key.is_empty(),
        ),
        ("tmdb", providers.tmdb.enabled, !providers.tmdb.api_key.is_empty()),
        ("tvdb", providers.tvdb.enabled, !providers.tvdb.api_key.is_empty()),
    ] {
        let state = match (enabled, has_key) {
            (false, _) => "disabled",
            (true, true) => "enabled",
            (true, false) => "enabled, missing api_key",
        };
        println!("  Provider {}: {}", name, state);
    }

    Ok(())
}
