//! FABU CLI - catalog and content checks for the storefront preview.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! fabu-cli catalog list
//!
//! # List the catalog as JSON
//! fabu-cli catalog list --json
//!
//! # Validate the catalog and the bundled page content
//! fabu-cli catalog validate
//!
//! # Dry-run a checkout for products 1, 1 and 3
//! fabu-cli checkout 1 1 3
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fabu-cli")]
#[command(author, version, about = "FABU storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Add products to a fresh cart and place the order, without a server
    Checkout {
        /// Product ids, one per unit (repeat an id for quantity)
        #[arg(required = true)]
        product_ids: Vec<String>,

        /// Print the order as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List every product
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check the catalog and the page content directory
    Validate {
        /// Page content directory (defaults to `STOREFRONT_CONTENT_DIR`)
        #[arg(long)]
        content_dir: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { json } => commands::catalog::list(json)?,
            CatalogAction::Validate { content_dir } => {
                commands::catalog::validate(content_dir)?;
            }
        },
        Commands::Checkout { product_ids, json } => {
            commands::checkout::dry_run(&product_ids, json)?;
        }
    }
    Ok(())
}
