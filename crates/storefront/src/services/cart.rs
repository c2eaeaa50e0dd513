//! Cart edits that go through the marketplace API.

use tracing::instrument;

use quikmart_core::ProductId;
use quikmart_core::routes::WISHLIST_ROUTE;

use crate::api::{ApiError, MarketplaceApi};
use crate::models::CartItem;
use crate::state::{Notice, Session};

/// Empty the shopper's cart on the server, then locally.
///
/// The staging list is left alone.
///
/// # Errors
///
/// Returns the API error if the server did not empty the cart; the local cart
/// is then unchanged.
#[instrument(skip_all, fields(user_id = %session.user().id))]
pub async fn empty_cart<A: MarketplaceApi>(session: &mut Session, api: &A) -> Result<(), ApiError> {
    if let Err(error) = api.empty_cart(&session.user().id).await {
        tracing::error!(error = %error, "Failed to empty cart");
        session.push_notice(Notice::error("Could not empty your cart."));
        return Err(error);
    }

    session.clear_cart();
    tracing::info!("Cart emptied");
    Ok(())
}

/// Remove one product from the cart on the server, then locally.
///
/// Returns the removed item, or `None` without calling the server if the
/// product is not in the local cart.
///
/// # Errors
///
/// Returns the API error if the server did not remove the item.
#[instrument(skip_all, fields(user_id = %session.user().id, product_id = %product_id))]
pub async fn remove_cart_item<A: MarketplaceApi>(
    session: &mut Session,
    api: &A,
    product_id: &ProductId,
) -> Result<Option<CartItem>, ApiError> {
    if session.cart_item(product_id).is_none() {
        tracing::debug!("Product not in cart, nothing to remove");
        return Ok(None);
    }

    if let Err(error) = api.remove_from_cart(&session.user().id, product_id).await {
        tracing::error!(error = %error, "Failed to remove item from cart");
        session.push_notice(Notice::error("Could not remove the item from your cart."));
        return Err(error);
    }

    let removed = session.remove_cart_item(product_id);
    if let Some(item) = &removed {
        session.push_notice(Notice::info(format!("{} removed from cart!", item.title)));
    }
    Ok(removed)
}

/// Move the whole cart onto the wishlist on the server, then locally.
///
/// Returns the number of items moved.
///
/// # Errors
///
/// Returns the API error if the server did not move the cart.
#[instrument(skip_all, fields(user_id = %session.user().id))]
pub async fn move_cart_to_wishlist<A: MarketplaceApi>(
    session: &mut Session,
    api: &A,
) -> Result<usize, ApiError> {
    if let Err(error) = api.cart_to_wishlist(&session.user().id).await {
        tracing::error!(error = %error, "Failed to move cart to wishlist");
        session.push_notice(Notice::error("Could not move your cart to the wishlist."));
        return Err(error);
    }

    let moved = session.cart().len();
    session.move_cart_to_wishlist();
    session.push_notice(Notice::info(format!(
        "Moved {moved} items to your wishlist at {WISHLIST_ROUTE}"
    )));
    tracing::info!(moved, "Cart moved to wishlist");
    Ok(moved)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, Endpoint, FakeMarketplace};
    use crate::models::User;
    use crate::pagination::DEFAULT_PAGE_SIZE;
    use quikmart_core::{Availability, CurrencyCode, Numeric, Role, UserId, VendorId};

    fn item(id: &str) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: String::new(),
            category: None,
            price: Numeric::from(5_u32),
            currency: CurrencyCode::new("INR"),
            owner: VendorId::new("v1"),
            owner_name: "Vendor".to_string(),
            availability: Availability::Available,
        }
    }

    fn session() -> Session {
        let user = User {
            id: UserId::new("u1"),
            name: "Asha".to_string(),
            email: None,
            role: Role::User,
            coins: Numeric::default(),
        };
        let mut session = Session::new(user, DEFAULT_PAGE_SIZE);
        session.add_to_cart(item("p1"));
        session.add_to_cart(item("p2"));
        session
    }

    #[tokio::test]
    async fn test_empty_cart_keeps_staging() {
        let api = FakeMarketplace::new();
        let mut session = session();
        session.stage_available_cart();

        empty_cart(&mut session, &api).await.unwrap();

        assert!(session.cart().is_empty());
        assert_eq!(session.staging().len(), 2);
        assert_eq!(api.calls(), [Call::EmptyCart(UserId::new("u1"))]);
    }

    #[tokio::test]
    async fn test_empty_cart_failure_keeps_cart() {
        let api = FakeMarketplace::new().failing(Endpoint::EmptyCart);
        let mut session = session();

        assert!(empty_cart(&mut session, &api).await.is_err());
        assert_eq!(session.cart().len(), 2);
        assert_eq!(session.notices().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_cart_item() {
        let api = FakeMarketplace::new();
        let mut session = session();

        let removed = remove_cart_item(&mut session, &api, &ProductId::new("p1"))
            .await
            .unwrap();

        assert_eq!(removed.unwrap().id, ProductId::new("p1"));
        assert_eq!(session.cart().len(), 1);
        assert_eq!(session.notices()[0].message, "Product p1 removed from cart!");
    }

    #[tokio::test]
    async fn test_remove_unknown_item_skips_request() {
        let api = FakeMarketplace::new();
        let mut session = session();

        let removed = remove_cart_item(&mut session, &api, &ProductId::new("ghost"))
            .await
            .unwrap();

        assert!(removed.is_none());
        assert!(api.calls().is_empty());
        assert_eq!(session.cart().len(), 2);
    }

    #[tokio::test]
    async fn test_move_cart_to_wishlist() {
        let api = FakeMarketplace::new();
        let mut session = session();

        let moved = move_cart_to_wishlist(&mut session, &api).await.unwrap();

        assert_eq!(moved, 2);
        assert!(session.cart().is_empty());
        assert_eq!(session.wishlist().len(), 2);
    }

    #[tokio::test]
    async fn test_move_cart_to_wishlist_failure() {
        let api = FakeMarketplace::new().failing(Endpoint::CartToWishlist);
        let mut session = session();

        assert!(move_cart_to_wishlist(&mut session, &api).await.is_err());
        assert_eq!(session.cart().len(), 2);
        assert!(session.wishlist().is_empty());
    }
}
