//! `pages` command.

use std::path::Path;

use quikmart_core::text::truncate;
use quikmart_storefront::config::StorefrontConfig;

use super::load_session;

const TITLE_WIDTH: usize = 32;

/// Print one page of the cart.
///
/// Pages past the end print an empty listing.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn list(
    path: &Path,
    config: &StorefrontConfig,
    page: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = load_session(path, config).await?;
    session.set_cart_page(page);

    #[allow(clippy::print_stdout)]
    {
        for item in session.cart_page_items() {
            let marker = if item.is_available() { " " } else { "x" };
            println!(
                "{marker} {:<24} {:<width$} {:>12}  {}",
                item.id,
                truncate(&item.title, TITLE_WIDTH),
                item.unit_price().to_string(),
                item.owner_name,
                width = TITLE_WIDTH,
            );
        }
        println!(
            "Page {} of {} ({} items)",
            session.cart_page(),
            session.cart_page_count(),
            session.cart().len()
        );
    }

    Ok(())
}
