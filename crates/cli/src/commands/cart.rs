//! `cart` subcommands.

use std::path::Path;

use quikmart_core::ProductId;
use quikmart_storefront::config::StorefrontConfig;
use quikmart_storefront::services;

use super::{client, load_session, print_notices, save_session};

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the session cannot be read or saved, or the server
/// refused the request.
pub async fn empty(path: &Path, config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = load_session(path, config).await?;
    let api = client(config)?;

    let result = services::empty_cart(&mut session, &api).await;
    print_notices(&mut session);
    result?;

    save_session(path, &session).await
}

/// Remove one product from the cart.
///
/// # Errors
///
/// Returns an error if the session cannot be read or saved, or the server
/// refused the request.
pub async fn remove(
    path: &Path,
    config: &StorefrontConfig,
    product_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = load_session(path, config).await?;
    let api = client(config)?;

    let result = services::remove_cart_item(&mut session, &api, &ProductId::new(product_id)).await;
    print_notices(&mut session);

    if result?.is_none() {
        tracing::warn!(product_id, "Product not in cart");
        return Ok(());
    }

    save_session(path, &session).await
}

/// Move the whole cart to the wishlist.
///
/// # Errors
///
/// Returns an error if the session cannot be read or saved, or the server
/// refused the request.
pub async fn to_wishlist(
    path: &Path,
    config: &StorefrontConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = load_session(path, config).await?;
    let api = client(config)?;

    let result = services::move_cart_to_wishlist(&mut session, &api).await;
    print_notices(&mut session);
    result?;

    save_session(path, &session).await
}
