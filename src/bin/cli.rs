//! Movie Cast API CLI
//!
//! Local execution entry point. Runs the same handler the Lambda uses
//! against JSON table files. For AWS Lambda, use `cast-lambda`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cast_api::{
    error::{AppError, Result},
    handler::{ApiGatewayResponse, handle_event},
    models::{Config, QueryParams},
    storage::LocalStore,
};
use serde_json::{Value, json};

/// cast - Movie cast lookup
#[derive(Parser, Debug)]
#[command(name = "cast", version, about = "Movie cast lookup against local tables")]

struct Cli {
    /// Path to store directory containing config.toml and table files
    #[arg(short, long, default_value = "data")]
    store_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up the cast of a movie
    Query {
        /// Movie id (passed through unparsed, as the HTTP layer would)
        #[arg(long)]
        movie_id: Option<String>,

        /// Include movie facts
        #[arg(long)]
        facts: bool,

        /// Role name prefix (takes precedence over --actor-name)
        #[arg(long)]
        role_name: Option<String>,

        /// Actor name prefix
        #[arg(long)]
        actor_name: Option<String>,
    },

    /// Validate configuration and table files
    Validate,

    /// Show configured tables and item counts
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Build the query string map the HTTP layer would deliver.
///
/// With no flags at all the map is absent, like an event without a query string.
fn query_params(
    movie_id: Option<String>,
    facts: bool,
    role_name: Option<String>,
    actor_name: Option<String>,
) -> Option<QueryParams> {
    let params: QueryParams = [
        ("movieId", movie_id),
        ("facts", facts.then(|| "true".to_string())),
        ("roleName", role_name),
        ("actorName", actor_name),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
    .collect();

    (!params.is_empty()).then_some(params)
}

fn print_response(response: &ApiGatewayResponse) -> Result<()> {
    let body: Value = response.body_json()?;
    println!("HTTP {}", response.status_code);
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.store_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    let store = LocalStore::new(&cli.store_dir, config.tables.clone());

    log::debug!("Loaded configuration from {}", cli.store_dir.display());

    match cli.command {
        Command::Query {
            movie_id,
            facts,
            role_name,
            actor_name,
        } => {
            let event = json!({
                "queryStringParameters": query_params(movie_id, facts, role_name, actor_name),
            });
            let response = handle_event(&store, event).await;
            print_response(&response)?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");

            for table in [&config.tables.cast_table, &config.tables.movie_table] {
                match store.scan(table).await? {
                    Some(items) => log::info!("✓ {} OK ({} items)", table, items.len()),
                    None => {
                        return Err(AppError::config(format!(
                            "Table file not found: {}",
                            store.table_path(table).display()
                        )));
                    }
                }
            }

            log::info!("All validations passed!");
        }

        Command::Info => {
            log::info!("Store directory: {}", cli.store_dir.display());
            log::info!(
                "Config: {}",
                if config_path.exists() {
                    "config.toml"
                } else {
                    "defaults"
                }
            );
            for table in [&config.tables.cast_table, &config.tables.movie_table] {
                match store.scan(table).await {
                    Ok(Some(items)) => log::info!("{}: {} items", table, items.len()),
                    Ok(None) => log::info!("{}: not found", table),
                    Err(e) => log::warn!("{}: unreadable ({})", table, e),
                }
            }
        }
    }

    Ok(())
}
