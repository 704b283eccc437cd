//! Showroom CLI - Browse the catalog and simulate a shopper session.
//!
//! # Usage
//!
//! ```bash
//! # List audio products, cheapest first
//! showroom catalog --category Audio --sort price-low
//!
//! # Quick search over names and categories
//! showroom search laptop
//!
//! # Fill a cart and price it with a promo code
//! showroom cart --add 1:2 --add 7 --promo save10
//!
//! # Validate a contact form, then submit it
//! showroom contact -n "Somchai" -e somchai@example.com -p 081-234-5678 \
//!     -m "Do you ship to Chiang Mai?" --submit
//! ```
//!
//! Set `RUST_LOG` to change verbosity (default: `showroom=info`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use showroom_storefront::{Storefront, StorefrontConfig};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::cart::CartItem;

#[derive(Parser)]
#[command(name = "showroom")]
#[command(author, version, about = "Showroom storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog {
        /// Category to show (`all` for every category)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Case-insensitive text to match in name or description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort order (`default`, `price-low`, `price-high`, `rating`, `name`)
        #[arg(long, default_value = "default")]
        sort: String,

        /// Number of "load more" steps to apply
        #[arg(long, default_value_t = 0)]
        more: usize,
    },
    /// List categories with product counts
    Categories,
    /// Quick search by product name or category
    Search {
        /// Search terms
        query: Vec<String>,
    },
    /// Add products to a cart and show the order summary
    Cart {
        /// Product to add as `ID` or `ID:QTY` (repeatable)
        #[arg(short = 'a', long = "add", value_name = "ID[:QTY]")]
        items: Vec<CartItem>,

        /// Promo code to apply
        #[arg(short, long)]
        promo: Option<String>,
    },
    /// Validate or submit the contact form
    Contact {
        #[arg(short, long, default_value = "")]
        name: String,

        #[arg(short, long, default_value = "")]
        email: String,

        #[arg(short, long, default_value = "")]
        phone: String,

        #[arg(short, long, default_value = "")]
        message: String,

        /// Submit after validating
        #[arg(long)]
        submit: bool,
    },
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("showroom=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let store = Storefront::open(config).await?;

    match cli.command {
        Commands::Catalog {
            category,
            search,
            sort,
            more,
        } => commands::catalog::list(&store, &category, &search, &sort, more),
        Commands::Categories => commands::catalog::categories(&store),
        Commands::Search { query } => commands::catalog::search(&store, &query.join(" ")),
        Commands::Cart { items, promo } => {
            commands::cart::checkout(&store, &items, promo.as_deref()).await?;
        }
        Commands::Contact {
            name,
            email,
            phone,
            message,
            submit,
        } => {
            let form = showroom_storefront::ContactForm {
                name,
                email,
                phone,
                message,
            };
            commands::contact::run(&store, &form, submit).await?;
        }
    }

    store.close();
    Ok(())
}
