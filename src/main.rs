//! Interactive console for the alias registry.
//!
//! Stands in for a form/statistics UI: one process owns the registry for the
//! session, and every command round-trips through the public service
//! operations. Aliases live only as long as the process.
//!
//! # Usage
//!
//! ```bash
//! # Start the console
//! cargo run
//!
//! # Override the display origin for short URLs
//! cargo run -- --origin https://sho.rt
//! ```
//!
//! # Environment Variables
//!
//! See [`alias_registry::config`] for the full list. All are optional.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::*;
use dialoguer::{Confirm, Input, Select};
use tracing_subscriber::EnvFilter;

use alias_registry::application::services::AliasService;
use alias_registry::config::{self, Config};
use alias_registry::domain::clock::SystemClock;
use alias_registry::domain::entities::AliasRequest;
use alias_registry::domain::repositories::AliasRepository;
use alias_registry::error::RegistryError;
use alias_registry::infrastructure::persistence::MemoryAliasRepository;

type Registry = AliasService<MemoryAliasRepository, SystemClock>;

/// Interactive console for managing short URL aliases.
#[derive(Parser)]
#[command(name = "alias-registry")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Override the display origin for short URLs
    #[arg(long)]
    origin: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = config::load_from_env()?;
    if let Some(origin) = cli.origin {
        config.origin = origin;
    }

    init_tracing(&config);
    config.print_summary();

    let repository = Arc::new(MemoryAliasRepository::new());
    let registry = AliasService::new(repository.clone(), Arc::new(SystemClock));

    println!(
        "{}",
        "URL alias console. Aliases last only for this session.".bold()
    );

    loop {
        let actions = [
            "Shorten URLs",
            "Resolve a code",
            "List live aliases",
            "Purge expired",
            "Export live aliases as JSON",
            "Reset registry",
            "Quit",
        ];
        let choice = Select::new()
            .with_prompt("Action")
            .items(&actions)
            .default(0)
            .interact()?;

        match choice {
            0 => shorten(&registry, &config).await?,
            1 => resolve(&registry).await?,
            2 => list(&registry, &config).await?,
            3 => purge(&registry).await?,
            4 => export(&registry).await?,
            5 => reset(repository.as_ref()).await?,
            _ => break,
        }
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Collects up to `max_batch_size` creation requests and submits them as one
/// batch. The ceiling lives here, on the caller side of the contract.
async fn shorten(registry: &Registry, config: &Config) -> Result<()> {
    let count: usize = Input::new()
        .with_prompt(format!("How many URLs? (1-{})", config.max_batch_size))
        .default(1)
        .interact_text()?;

    if count == 0 || count > config.max_batch_size {
        println!(
            "{}",
            format!("Enter between 1 and {} URLs", config.max_batch_size).red()
        );
        return Ok(());
    }

    let mut requests = Vec::with_capacity(count);
    for index in 0..count {
        let original_url: String = Input::new()
            .with_prompt(format!("URL #{}", index + 1))
            .allow_empty(true)
            .interact_text()?;

        let validity: String = Input::new()
            .with_prompt("Validity in minutes (blank for 30)")
            .allow_empty(true)
            .validate_with(|v: &String| -> Result<(), &str> {
                if v.trim().is_empty() || v.trim().parse::<u32>().is_ok() {
                    Ok(())
                } else {
                    Err("enter a whole number of minutes")
                }
            })
            .interact_text()?;

        let custom_code: String = Input::new()
            .with_prompt("Custom code (blank to generate)")
            .allow_empty(true)
            .interact_text()?;

        requests.push(AliasRequest {
            original_url,
            validity_minutes: validity.trim().parse().ok(),
            custom_code: match custom_code.trim() {
                "" => None,
                code => Some(code.to_string()),
            },
        });
    }

    match registry.create_batch(requests).await {
        Ok(aliases) => {
            println!(
                "{}",
                format!("Created {} alias(es):", aliases.len()).green().bold()
            );
            for alias in &aliases {
                println!(
                    "  {}  ->  {}  (expires {})",
                    registry.short_url(&config.origin, &alias.code).cyan(),
                    alias.original_url,
                    alias.expires_at.format("%Y-%m-%d %H:%M:%S UTC"),
                );
            }
        }
        Err(RegistryError::Validation(errors)) => {
            println!("{}", "Nothing was created:".red().bold());
            for error in errors {
                println!("  {}", error.to_string().red());
            }
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

async fn resolve(registry: &Registry) -> Result<()> {
    let code: String = Input::new().with_prompt("Short code").interact_text()?;

    match registry.resolve(code.trim()).await {
        Ok(alias) => println!("{}  ->  {}", code.trim().cyan(), alias.original_url.green()),
        Err(RegistryError::NotFound { .. }) => {
            println!("{}", "Not found or expired".yellow());
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

async fn list(registry: &Registry, config: &Config) -> Result<()> {
    let aliases = registry.list_live().await?;

    if aliases.is_empty() {
        println!("{}", "No live aliases".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:<30} {:>8} {:<26} {}",
            "SHORT URL", "MINUTES", "EXPIRES", "ORIGINAL"
        )
        .bold()
    );
    for alias in &aliases {
        println!(
            "{:<30} {:>8} {:<26} {}",
            registry.short_url(&config.origin, &alias.code),
            alias.validity_minutes,
            alias.expires_at.to_rfc3339(),
            alias.original_url,
        );
    }

    Ok(())
}

async fn purge(registry: &Registry) -> Result<()> {
    let removed = registry.purge_expired().await?;
    println!("Removed {} expired alias(es)", removed);
    Ok(())
}

async fn export(registry: &Registry) -> Result<()> {
    let aliases = registry.list_live().await?;
    println!("{}", serde_json::to_string_pretty(&aliases)?);
    Ok(())
}

async fn reset(repository: &MemoryAliasRepository) -> Result<()> {
    let confirmed = Confirm::new()
        .with_prompt("Drop every alias and free every code?")
        .default(false)
        .interact()?;

    if confirmed {
        repository.clear().await?;
        println!("{}", "Registry reset".green());
    }

    Ok(())
}
