//! Console front end for the user fetcher.
//!
//! ```text
//! user-fetcher [--config fetcher.toml] [--base-url URL] demo
//! user-fetcher user 2
//! user-fetcher --json list
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use user_fetcher::config::{load_config, validation::validate_config, ConfigError, FetcherConfig};
use user_fetcher::observability::logging::init_tracing;
use user_fetcher::{User, UserService};

#[derive(Parser)]
#[command(name = "user-fetcher")]
#[command(about = "Fetch users from a paginated users API", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `api.base_url`.
    #[arg(short, long)]
    base_url: Option<String>,

    /// Override `observability.log_level`.
    #[arg(long)]
    log_level: Option<String>,

    /// Print users as JSON.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a single user by ID
    User { id: i64 },
    /// Fetch every user across all pages
    List,
    /// Fetch user 2, then the full list
    Demo,
}

fn resolve_config(cli: &Cli) -> Result<FetcherConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FetcherConfig::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    init_tracing(&config.observability.log_level);
    tracing::info!(base_url = %config.api.base_url, "user-fetcher starting");

    let service = UserService::from_config(&config)?;

    match cli.command {
        Commands::User { id } => {
            let user = service.fetch_user_by_id(id).await?;
            print_user(&user, cli.json)?;
        }
        Commands::List => {
            let users = service.fetch_all_users().await?;
            print_users(&users, cli.json)?;
        }
        Commands::Demo => {
            let user = service.fetch_user_by_id(2).await?;
            println!("User 2: {} - {}", user.full_name(), user.email);

            let users = service.fetch_all_users().await?;
            println!("Fetched {} users.", users.len());
            println!("----");
            print_users(&users, cli.json)?;
        }
    }

    Ok(())
}

fn print_user(user: &User, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(user)?);
    } else {
        println!("{} {} <{}> {}", user.id, user.full_name(), user.email, user.avatar_url);
    }
    Ok(())
}

fn print_users(users: &[User], json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(users)?);
    } else {
        for user in users {
            println!("- {}", user.full_name());
        }
    }
    Ok(())
}
