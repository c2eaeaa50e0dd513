//! `preview` and `checkout` commands.

use std::path::Path;

use tracing::info;

use quikmart_storefront::config::StorefrontConfig;
use quikmart_storefront::services::{CheckoutOutcome, place_order};
use quikmart_storefront::staging::{build_order_payloads, compute_reward};

use super::{StagingRequest, apply_staging, client, load_session, print_notices, save_session};

/// Print the per-vendor orders and reward a checkout would produce.
///
/// Nothing is sent and the session file is not modified.
///
/// # Errors
///
/// Returns an error if the session cannot be read or the selection is invalid.
pub async fn preview(
    path: &Path,
    config: &StorefrontConfig,
    request: &StagingRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = load_session(path, config).await?;
    apply_staging(&mut session, request)?;

    if session.staging().is_empty() {
        return Err("No items staged for ordering".into());
    }

    let orders = build_order_payloads(session.staging().items(), session.user());
    let earned = compute_reward(&orders, config.reward_rate);
    let balance = session.user().coin_balance().saturating_add(earned);

    let json = serde_json::to_string_pretty(&orders)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{json}");
        println!();
        println!(
            "{} order(s), {} coins earned, balance after checkout {}",
            orders.len(),
            earned.normalize(),
            balance.normalize()
        );
    }

    Ok(())
}

/// Submit orders for the selected items and update the reward balance.
///
/// # Errors
///
/// Returns an error if the session cannot be read or saved, the selection is
/// invalid, or the orders were rejected.
pub async fn checkout(
    path: &Path,
    config: &StorefrontConfig,
    request: &StagingRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = load_session(path, config).await?;
    apply_staging(&mut session, request)?;

    let api = client(config)?;
    let result = place_order(&mut session, &api, config.reward_rate).await;
    print_notices(&mut session);

    match result? {
        CheckoutOutcome::Rewarded {
            orders,
            earned,
            balance,
        } => {
            info!(orders, %earned, %balance, "Checkout complete");
        }
        CheckoutOutcome::RewardUnconfirmed { orders, error } => {
            tracing::warn!(orders, error = %error, "Checkout complete, reward unconfirmed");
        }
    }

    save_session(path, &session).await
}
