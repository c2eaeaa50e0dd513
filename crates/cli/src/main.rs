//! Quikmart CLI - Cart staging and checkout against the marketplace API.
//!
//! # Usage
//!
//! ```bash
//! # Show the per-vendor orders the available cart would produce
//! qm-cli --session session.json preview --all
//!
//! # Place orders for two items, ordering three of the first
//! qm-cli --session session.json checkout --items p1,p2 --quantity p1=3
//!
//! # Cart management
//! qm-cli --session session.json cart remove p2
//! qm-cli --session session.json cart to-wishlist
//! qm-cli --session session.json cart empty
//!
//! # Browse the cart a page at a time
//! qm-cli --session session.json pages --page 2
//! ```
//!
//! # Commands
//!
//! - `preview` - Build orders without sending them
//! - `checkout` - Submit orders and update reward coins
//! - `cart` - Empty the cart, remove an item, or move it to the wishlist
//! - `pages` - List one page of the cart
//!
//! The session file holds the signed-in user, cart, wishlist and placed
//! orders as JSON. Commands that change server state write it back.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quikmart_storefront::config::StorefrontConfig;

mod commands;

#[derive(Parser)]
#[command(name = "qm-cli")]
#[command(author, version, about = "Quikmart cart and checkout tools")]
struct Cli {
    /// Session snapshot file (user, cart, wishlist, orders)
    #[arg(short, long, global = true, default_value = "session.json")]
    session: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the orders and reward a checkout would produce
    Preview {
        #[command(flatten)]
        selection: Selection,
    },
    /// Submit orders for the selected items
    Checkout {
        #[command(flatten)]
        selection: Selection,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// List one page of the cart
    Pages {
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
}

/// Which cart items to stage, and at what quantity.
#[derive(Args)]
struct Selection {
    #[command(flatten)]
    items: ItemSelection,

    /// Quantity override as `PRODUCT_ID=N` (repeatable, N >= 1)
    #[arg(short, long = "quantity", value_name = "PRODUCT_ID=N")]
    quantities: Vec<String>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ItemSelection {
    /// Stage every available cart item
    #[arg(long)]
    all: bool,

    /// Stage these product IDs (comma-separated)
    #[arg(long, value_delimiter = ',')]
    items: Vec<String>,
}

#[derive(Subcommand)]
enum CartAction {
    /// Remove every item from the cart
    Empty,
    /// Remove one product from the cart
    Remove {
        /// Product ID
        product_id: String,
    },
    /// Move the whole cart to the wishlist
    ToWishlist,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Install the tracing subscriber with `EnvFilter` and the Sentry layer.
fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quikmart_storefront=info,qm_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt().with_writer(std::io::stderr).init();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let sentry_guard = init_sentry(&config);
    init_tracing();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        // Flush Sentry before exiting; `exit` skips destructors
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let path = cli.session;
    match cli.command {
        Commands::Preview { selection } => {
            commands::checkout::preview(&path, config, &selection.into_request()).await?;
        }
        Commands::Checkout { selection } => {
            commands::checkout::checkout(&path, config, &selection.into_request()).await?;
        }
        Commands::Cart { action } => match action {
            CartAction::Empty => commands::cart::empty(&path, config).await?,
            CartAction::Remove { product_id } => {
                commands::cart::remove(&path, config, &product_id).await?;
            }
            CartAction::ToWishlist => commands::cart::to_wishlist(&path, config).await?,
        },
        Commands::Pages { page } => commands::pages::list(&path, config, page).await?,
    }
    Ok(())
}

impl Selection {
    fn into_request(self) -> commands::StagingRequest {
        commands::StagingRequest {
            all: self.items.all,
            items: self.items.items,
            quantities: self.quantities,
        }
    }
}
