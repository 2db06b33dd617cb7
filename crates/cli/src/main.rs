//! RocketShoes CLI - drive the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! rs-cart show
//!
//! # Add one unit of product 1
//! rs-cart add 1
//!
//! # Set product 1 to three units
//! rs-cart update 1 3
//!
//! # Remove product 1
//! rs-cart remove 1
//!
//! # Empty the cart
//! rs-cart clear
//! ```
//!
//! Configuration comes from the environment (see `rocketshoes_cart::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rocketshoes_cart::CartConfig;
use rocketshoes_core::ProductId;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::cart::{Action, CliError};

#[derive(Parser)]
#[command(name = "rs-cart")]
#[command(author, version, about = "RocketShoes cart")]
struct Cli {
    /// Catalog API base URL (overrides `CART_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the cart slot (overrides `CART_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart and its totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: ProductId,
    },
    /// Set the quantity of a product in the cart
    Update {
        /// Product ID
        product_id: ProductId,

        /// New quantity (non-positive values are ignored)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Empty the cart
    Clear,
}

impl From<Commands> for Action {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Show => Self::Show,
            Commands::Add { product_id } => Self::Add(product_id),
            Commands::Remove { product_id } => Self::Remove(product_id),
            Commands::Update { product_id, amount } => Self::Update(product_id, amount),
            Commands::Clear => Self::Clear,
        }
    }
}

fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rocketshoes_cart=info,rocketshoes_cli=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = CartConfig::from_env()?;

    if let Some(api_url) = cli.api_url {
        config.catalog.api_url = api_url
            .parse()
            .map_err(|e| CliError::InvalidArgument(format!("--api-url: {e}")))?;
    }
    if let Some(dir) = cli.storage_dir {
        config.storage.dir = dir;
    }

    tracing::debug!(?config, "Loaded configuration");

    commands::cart::run(&config, cli.command.into()).await
}
