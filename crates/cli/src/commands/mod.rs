//! Subcommand implementations.
//!
//! Each command loads the session snapshot, acts on it through the
//! storefront services, prints the queued notices, and saves the snapshot
//! back when server state changed.

use std::path::Path;

use thiserror::Error;

use quikmart_core::{Numeric, ProductId};
use quikmart_storefront::api::MarketplaceClient;
use quikmart_storefront::config::StorefrontConfig;
use quikmart_storefront::state::{NoticeLevel, Session, SessionSnapshot};

pub mod cart;
pub mod checkout;
pub mod pages;

/// Errors from reading command arguments.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid quantity `{0}`, expected PRODUCT_ID=N with N >= 1")]
    InvalidQuantity(String),

    #[error("product {0} is not staged")]
    NotStaged(String),
}

/// Item selection shared by `preview` and `checkout`.
#[derive(Debug, Default)]
pub struct StagingRequest {
    pub all: bool,
    pub items: Vec<String>,
    pub quantities: Vec<String>,
}

/// Read the session snapshot at `path`.
async fn load_session(
    path: &Path,
    config: &StorefrontConfig,
) -> Result<Session, Box<dyn std::error::Error>> {
    let content = tokio::fs::read_to_string(path).await?;
    let snapshot: SessionSnapshot = serde_json::from_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        cart = snapshot.cart.len(),
        wishlist = snapshot.wishlist.len(),
        "Loaded session"
    );
    Ok(Session::from_snapshot(snapshot, config.page_size))
}

/// Write the session snapshot back to `path`.
async fn save_session(path: &Path, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string_pretty(&session.snapshot())?;
    tokio::fs::write(path, content).await?;
    tracing::debug!(path = %path.display(), "Saved session");
    Ok(())
}

fn client(config: &StorefrontConfig) -> Result<MarketplaceClient, Box<dyn std::error::Error>> {
    Ok(MarketplaceClient::new(&config.api)?)
}

/// Stage the requested items, then apply quantity overrides.
///
/// Unknown product IDs are skipped with a warning.
fn apply_staging(session: &mut Session, request: &StagingRequest) -> Result<(), CommandError> {
    if request.all {
        session.stage_available_cart();
    } else {
        for id in &request.items {
            if !session.stage_item(&ProductId::new(id.as_str())) {
                tracing::warn!(product_id = %id, "Not in cart or already staged, skipping");
            }
        }
    }

    for raw in &request.quantities {
        let (id, quantity) = parse_quantity(raw)?;
        if !session.update_staged_quantity(&id, Numeric::from(quantity)) {
            return Err(CommandError::NotStaged(id.to_string()));
        }
    }
    Ok(())
}

/// Parse a `PRODUCT_ID=N` override.
fn parse_quantity(raw: &str) -> Result<(ProductId, u32), CommandError> {
    let invalid = || CommandError::InvalidQuantity(raw.to_string());
    let (id, quantity) = raw.split_once('=').ok_or_else(invalid)?;
    let id = id.trim();
    let quantity: u32 = quantity.trim().parse().map_err(|_| invalid())?;
    if id.is_empty() || quantity == 0 {
        return Err(invalid());
    }
    Ok((ProductId::new(id), quantity))
}

/// Print and clear the session's notices.
#[allow(clippy::print_stdout)]
fn print_notices(session: &mut Session) {
    for notice in session.drain_notices() {
        let tag = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        };
        println!("[{tag}] {}", notice.message);
    }
}
