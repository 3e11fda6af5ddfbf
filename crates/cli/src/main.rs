//! `galleria`: back-office console for the gallery shop.
//!
//! Manages materials, customers, galleries and price lists, and books sales
//! through the back-office REST API.

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};

use galleria_client::{ConnectivityState, HttpBackoffice};

use commands::checkout::CheckoutArgs;
use commands::customers::CustomerCommand;
use commands::galleries::GalleryCommand;
use commands::materials::MaterialCommand;
use commands::price_lists::PriceListCommand;
use commands::settings::ConfigCommand;
use config::ClientConfig;
use output::OutputFormat;

/// Galleria back-office console.
#[derive(Parser, Debug)]
#[command(name = "galleria", version, about = "Gallery shop back-office console")]
struct Cli {
    /// Path to client config file (default: ~/.galleria/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// Backend base URL; overrides the config file and GALLERIA_API_URL.
    #[arg(long = "api-url", global = true)]
    api_url: Option<String>,

    /// Output format.
    #[arg(long = "output", short = 'o', global = true, value_enum, default_value_t)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Backend(BackendCommand),

    /// Inspect or write the client configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

/// Commands that talk to the backend.
#[derive(Subcommand, Debug)]
enum BackendCommand {
    /// Products and stock.
    #[command(alias = "material")]
    Materials {
        #[command(subcommand)]
        action: MaterialCommand,
    },

    /// Customers and their relatives.
    #[command(alias = "customer")]
    Customers {
        #[command(subcommand)]
        action: CustomerCommand,
    },

    /// Exhibitions and their running dates.
    #[command(alias = "gallery")]
    Galleries {
        #[command(subcommand)]
        action: GalleryCommand,
    },

    /// Buy/sell prices per material and date range.
    #[command(name = "price-lists", alias = "price-list")]
    PriceLists {
        #[command(subcommand)]
        action: PriceListCommand,
    },

    /// Book a sale: bill header, bill items, stock decrements, receipt.
    Checkout(CheckoutArgs),

    /// Check that the backend answers.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    galleria_observability::init();

    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(ClientConfig::default_path);
    let config = ClientConfig::resolve(&config_path, cli.api_url.as_deref())?;

    let command = match cli.command {
        Commands::Config { action } => {
            return commands::settings::run(&config, &config_path, cli.output, action);
        }
        Commands::Backend(command) => command,
    };

    let api = HttpBackoffice::new(&config.api_url, config.timeout())?;
    let ctx = commands::Context {
        api: &api,
        output: cli.output,
        config: &config,
        today: Local::now().date_naive(),
    };

    match command {
        BackendCommand::Materials { action } => commands::materials::run(&ctx, action).await?,
        BackendCommand::Customers { action } => commands::customers::run(&ctx, action).await?,
        BackendCommand::Galleries { action } => commands::galleries::run(&ctx, action).await?,
        BackendCommand::PriceLists { action } => commands::price_lists::run(&ctx, action).await?,
        BackendCommand::Checkout(args) => commands::checkout::run(&ctx, args).await?,
        BackendCommand::Status => match api.check_connectivity().await {
            ConnectivityState::Online => println!("{}: online", api.base_url()),
            ConnectivityState::Offline => anyhow::bail!("{}: unreachable", api.base_url()),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn checkout_collects_repeated_items() {
        let cli = Cli::try_parse_from([
            "galleria",
            "-o",
            "json",
            "checkout",
            "--customer",
            "29801011234567",
            "--gallery",
            "2",
            "--item",
            "3:2",
            "-i",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Commands::Backend(BackendCommand::Checkout(args)) => {
                assert_eq!(args.items.len(), 2);
                assert_eq!(args.items[0].quantity, 2);
                assert_eq!(args.gallery, galleria_core::GalleryId::new(2));
                assert!(!args.dry_run);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn malformed_customer_id_is_rejected_by_the_parser() {
        let err = Cli::try_parse_from(["galleria", "customers", "get", "12345"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn price_list_alias_and_global_flag_after_subcommand() {
        let cli = Cli::try_parse_from([
            "galleria",
            "price-list",
            "list",
            "--effective",
            "--api-url",
            "http://other:1",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://other:1"));
        assert!(matches!(
            cli.command,
            Commands::Backend(BackendCommand::PriceLists {
                action: PriceListCommand::List { effective: true, .. }
            })
        ));
    }
}
