//! Order submission.
//!
//! Checkout runs in three explicit stages so a caller that shares the
//! session (behind a lock, say) can release it while the network calls run:
//!
//! 1. [`begin_checkout`] builds one order per vendor from the staging list
//!    and marks the session as submitting;
//! 2. [`PendingCheckout::submit`] sends the orders and, if they were
//!    accepted, the new coin balance;
//! 3. [`finish_checkout`] applies the result to the session.
//!
//! [`place_order`] runs all three back to back.
//!
//! A rejected order submission leaves staging, orders and coins exactly as
//! they were. Once orders are accepted the checkout has succeeded: the
//! ordered products are unstaged even if the coin update then fails, and that
//! failure is reported without touching the local balance. Items staged
//! while the submission was in flight stay staged.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::instrument;

use quikmart_core::UserId;
use quikmart_core::routes::ORDERS_ROUTE;

use crate::api::{ApiError, MarketplaceApi};
use crate::models::OrderPayload;
use crate::staging::{build_order_payloads, compute_reward};
use crate::state::{Notice, Session};

/// Errors that stop a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing is staged.
    #[error("No items staged for ordering")]
    EmptyStaging,

    /// Another submission for this session has not finished yet.
    #[error("An order submission is already in progress")]
    SubmissionInFlight,

    /// The order endpoint rejected the submission.
    #[error("Order submission failed: {0}")]
    Submission(#[source] ApiError),
}

/// How a successful checkout ended.
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// Orders placed and the new coin balance saved.
    Rewarded {
        orders: usize,
        earned: Decimal,
        balance: Decimal,
    },
    /// Orders placed, but saving the coin balance failed.
    RewardUnconfirmed { orders: usize, error: ApiError },
}

impl CheckoutOutcome {
    /// Number of vendor orders that were placed.
    #[must_use]
    pub const fn orders_placed(&self) -> usize {
        match self {
            Self::Rewarded { orders, .. } | Self::RewardUnconfirmed { orders, .. } => *orders,
        }
    }
}

/// Orders built from the staging list, not yet sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCheckout {
    user_id: UserId,
    orders: Vec<OrderPayload>,
    earned: Decimal,
    balance: Decimal,
}

impl PendingCheckout {
    /// One order per vendor, in first-seen vendor order.
    #[must_use]
    pub fn orders(&self) -> &[OrderPayload] {
        &self.orders
    }

    /// Coins the shopper earns if the orders go through.
    #[must_use]
    pub const fn earned(&self) -> Decimal {
        self.earned
    }

    /// Coin balance after the reward is added.
    #[must_use]
    pub const fn balance(&self) -> Decimal {
        self.balance
    }

    /// Send the orders, then the new coin balance if the orders were
    /// accepted.
    #[instrument(skip_all, fields(user_id = %self.user_id, orders = self.orders.len()))]
    pub async fn submit<A: MarketplaceApi>(self, api: &A) -> SubmittedCheckout {
        if let Err(error) = api.create_orders(&self.orders).await {
            tracing::error!(error = %error, "Failed to submit orders");
            return SubmittedCheckout::OrdersFailed(error);
        }
        tracing::info!("Orders submitted");

        let reward_error = match api.update_user_coins(&self.user_id, self.balance).await {
            Ok(()) => None,
            Err(error) => {
                tracing::warn!(error = %error, "Orders placed but coin update failed");
                Some(error)
            }
        };

        SubmittedCheckout::Placed {
            orders: self.orders,
            earned: self.earned,
            balance: self.balance,
            reward_error,
        }
    }
}

/// Result of [`PendingCheckout::submit`], to be applied with
/// [`finish_checkout`].
#[derive(Debug)]
pub enum SubmittedCheckout {
    /// The order endpoint failed; nothing was placed.
    OrdersFailed(ApiError),
    /// Orders were accepted. `reward_error` is set if the coin update failed.
    Placed {
        orders: Vec<OrderPayload>,
        earned: Decimal,
        balance: Decimal,
        reward_error: Option<ApiError>,
    },
}

/// Build orders from the staging list and mark the session as submitting.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyStaging` if nothing is staged, or
/// `CheckoutError::SubmissionInFlight` if a previous checkout has not been
/// finished.
///
/// The session stays marked as submitting until [`finish_checkout`] runs.
/// A caller that abandons the [`PendingCheckout`] must still call
/// [`abandon_checkout`], or every later checkout is refused.
pub fn begin_checkout(
    session: &mut Session,
    reward_rate: Decimal,
) -> Result<PendingCheckout, CheckoutError> {
    if session.is_submitting() {
        return Err(CheckoutError::SubmissionInFlight);
    }
    if session.staging().is_empty() {
        return Err(CheckoutError::EmptyStaging);
    }

    let user = session.user();
    let orders = build_order_payloads(session.staging().items(), user);
    let earned = compute_reward(&orders, reward_rate);
    let pending = PendingCheckout {
        user_id: user.id.clone(),
        balance: user.coin_balance().saturating_add(earned),
        orders,
        earned,
    };

    session.begin_submission();
    Ok(pending)
}

/// Apply a submission result to the session.
///
/// # Errors
///
/// Returns `CheckoutError::Submission` if the orders were rejected. The
/// session is then unchanged apart from the error notice.
pub fn finish_checkout(
    session: &mut Session,
    submitted: SubmittedCheckout,
    at: DateTime<Utc>,
) -> Result<CheckoutOutcome, CheckoutError> {
    session.end_submission();

    match submitted {
        SubmittedCheckout::OrdersFailed(error) => {
            session.push_notice(Notice::error("Could not place your orders. Please try again."));
            Err(CheckoutError::Submission(error))
        }
        SubmittedCheckout::Placed {
            orders,
            earned,
            balance,
            reward_error,
        } => {
            session.record_placed_orders(&orders, at);
            for product in orders.iter().flat_map(|order| &order.products) {
                session.unstage_item(&product.id);
            }

            match reward_error {
                None => {
                    session.set_coins(balance);
                    session.push_notice(Notice::success(format!(
                        "Orders have been placed! You earned {} coins (balance {}). Track them at {ORDERS_ROUTE}",
                        earned.normalize(),
                        balance.normalize(),
                    )));
                    Ok(CheckoutOutcome::Rewarded {
                        orders: orders.len(),
                        earned,
                        balance,
                    })
                }
                Some(error) => {
                    session.push_notice(Notice::success(format!(
                        "Orders have been placed! Track them at {ORDERS_ROUTE}"
                    )));
                    session.push_notice(Notice::error(
                        "Your reward coins could not be confirmed.",
                    ));
                    Ok(CheckoutOutcome::RewardUnconfirmed {
                        orders: orders.len(),
                        error,
                    })
                }
            }
        }
    }
}

/// Clear the submitting flag for a [`PendingCheckout`] that will never be
/// submitted or finished. Staging, orders and coins are left as they are.
pub fn abandon_checkout(session: &mut Session, pending: PendingCheckout) {
    drop(pending);
    session.end_submission();
}

/// Clears the submitting flag when dropped, so a cancelled [`place_order`]
/// does not leave the session locked.
struct SubmissionGuard<'a> {
    session: &'a mut Session,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.session.end_submission();
    }
}

/// Run a full checkout: build, submit, and apply.
///
/// If the returned future is dropped before it completes, the session is no
/// longer marked as submitting. Orders the server may already have accepted
/// are then not recorded locally.
///
/// # Errors
///
/// Returns `CheckoutError` if nothing is staged, a submission is already in
/// flight, or the orders were rejected.
#[instrument(skip_all, fields(user_id = %session.user().id))]
pub async fn place_order<A: MarketplaceApi>(
    session: &mut Session,
    api: &A,
    reward_rate: Decimal,
) -> Result<CheckoutOutcome, CheckoutError> {
    let pending = begin_checkout(session, reward_rate)?;
    let mut guard = SubmissionGuard { session };
    let submitted = pending.submit(api).await;
    finish_checkout(&mut *guard.session, submitted, Utc::now())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, Endpoint, FakeMarketplace};
    use crate::models::{CartItem, User};
    use crate::pagination::DEFAULT_PAGE_SIZE;
    use crate::state::NoticeLevel;
    use quikmart_core::{Availability, CurrencyCode, Numeric, ProductId, Role, VendorId};

    fn rate() -> Decimal {
        Decimal::new(5, 2)
    }

    fn item(id: &str, owner: &str, price: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: String::new(),
            category: None,
            price: Numeric::from(price),
            currency: CurrencyCode::new("INR"),
            owner: VendorId::new(owner),
            owner_name: format!("Vendor {owner}"),
            availability: Availability::Available,
        }
    }

    fn staged_session() -> Session {
        let user = User {
            id: UserId::new("u1"),
            name: "Asha".to_string(),
            email: None,
            role: Role::User,
            coins: Numeric::from(10_u32),
        };
        let mut session = Session::new(user, DEFAULT_PAGE_SIZE);
        session.add_to_cart(item("1", "v1", 10));
        session.add_to_cart(item("2", "v2", 5));
        session.stage_available_cart();
        session.update_staged_quantity(&ProductId::new("1"), Numeric::from(2_u32));
        session
    }

    #[tokio::test]
    async fn test_place_order_rewards_coins() {
        let api = FakeMarketplace::new();
        let mut session = staged_session();

        let outcome = place_order(&mut session, &api, rate()).await.unwrap();

        let CheckoutOutcome::Rewarded {
            orders,
            earned,
            balance,
        } = outcome
        else {
            panic!("expected reward");
        };
        assert_eq!(orders, 2);
        assert_eq!(earned, Decimal::new(125, 2));
        assert_eq!(balance, Decimal::new(1125, 2));
        assert_eq!(session.user().coin_balance(), Decimal::new(1125, 2));
        assert!(session.staging().is_empty());
        assert_eq!(session.orders().len(), 2);
        assert!(!session.is_submitting());

        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], Call::CreateOrders(orders) if orders.len() == 2));
        assert_eq!(
            calls[1],
            Call::UpdateUserCoins {
                user_id: UserId::new("u1"),
                coins: Decimal::new(1125, 2),
            }
        );
    }

    #[tokio::test]
    async fn test_failed_orders_leave_session_untouched() {
        let api = FakeMarketplace::new().failing(Endpoint::CreateOrders);
        let mut session = staged_session();
        let staging_before = session.staging().clone();

        let err = place_order(&mut session, &api, rate()).await.unwrap_err();

        assert!(matches!(err, CheckoutError::Submission(ApiError::Api { status: 503, .. })));
        assert_eq!(session.staging(), &staging_before);
        assert!(session.orders().is_empty());
        assert_eq!(session.user().coin_balance(), Decimal::from(10));
        assert!(!session.is_submitting());
        assert!(api.calls_to(Endpoint::UpdateUser).is_empty());
        assert_eq!(session.notices().last().unwrap().level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_failed_reward_still_places_orders() {
        let api = FakeMarketplace::new().failing(Endpoint::UpdateUser);
        let mut session = staged_session();

        let outcome = place_order(&mut session, &api, rate()).await.unwrap();

        assert!(matches!(outcome, CheckoutOutcome::RewardUnconfirmed { orders: 2, .. }));
        assert!(session.staging().is_empty());
        assert_eq!(session.orders().len(), 2);
        // Balance is not guessed locally.
        assert_eq!(session.user().coin_balance(), Decimal::from(10));
        let levels: Vec<NoticeLevel> = session.notices().iter().map(|n| n.level).collect();
        assert_eq!(levels, [NoticeLevel::Success, NoticeLevel::Error]);
    }

    #[tokio::test]
    async fn test_empty_staging_is_refused_without_requests() {
        let api = FakeMarketplace::new();
        let mut session = staged_session();
        session.clear_staging();

        let err = place_order(&mut session, &api, rate()).await.unwrap_err();

        assert!(matches!(err, CheckoutError::EmptyStaging));
        assert!(api.calls().is_empty());
        assert!(!session.is_submitting());
    }

    #[test]
    fn test_second_checkout_refused_while_in_flight() {
        let mut session = staged_session();

        let pending = begin_checkout(&mut session, rate()).unwrap();
        assert_eq!(pending.orders().len(), 2);
        assert!(matches!(
            begin_checkout(&mut session, rate()),
            Err(CheckoutError::SubmissionInFlight)
        ));
    }

    #[tokio::test]
    async fn test_staged_checkout_can_resubmit_after_finish() {
        let api = FakeMarketplace::new().failing(Endpoint::CreateOrders);
        let mut session = staged_session();

        let pending = begin_checkout(&mut session, rate()).unwrap();
        let submitted = pending.submit(&api).await;
        assert!(finish_checkout(&mut session, submitted, Utc::now()).is_err());

        api.restore(Endpoint::CreateOrders);
        let outcome = place_order(&mut session, &api, rate()).await.unwrap();
        assert_eq!(outcome.orders_placed(), 2);
        assert_eq!(api.calls_to(Endpoint::CreateOrders).len(), 2);
    }

    #[tokio::test]
    async fn test_items_staged_during_flight_stay_staged() {
        let api = FakeMarketplace::new();
        let mut session = staged_session();
        session.add_to_cart(item("3", "v1", 7));
        session.unstage_item(&ProductId::new("2"));

        let pending = begin_checkout(&mut session, rate()).unwrap();
        session.stage_item(&ProductId::new("3"));
        let submitted = pending.submit(&api).await;
        finish_checkout(&mut session, submitted, Utc::now()).unwrap();

        let ordered: Vec<&str> = session.orders()[0]
            .order
            .products
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ordered, ["1"]);
        let staged: Vec<&str> = session.staging().items().iter().map(|s| s.id().as_str()).collect();
        assert_eq!(staged, ["3"]);
    }

    #[test]
    fn test_abandon_checkout_clears_flag() {
        let mut session = staged_session();

        let pending = begin_checkout(&mut session, rate()).unwrap();
        abandon_checkout(&mut session, pending);

        assert!(!session.is_submitting());
        assert_eq!(session.staging().len(), 2);
        assert!(begin_checkout(&mut session, rate()).is_ok());
    }

    /// Accepts calls but never answers.
    struct StalledMarketplace;

    impl MarketplaceApi for StalledMarketplace {
        async fn create_orders(&self, _orders: &[OrderPayload]) -> Result<(), ApiError> {
            std::future::pending().await
        }

        async fn update_user_coins(&self, _user_id: &UserId, _coins: Decimal) -> Result<(), ApiError> {
            std::future::pending().await
        }

        async fn empty_cart(&self, _user_id: &UserId) -> Result<(), ApiError> {
            std::future::pending().await
        }

        async fn remove_from_cart(
            &self,
            _user_id: &UserId,
            _product_id: &ProductId,
        ) -> Result<(), ApiError> {
            std::future::pending().await
        }

        async fn cart_to_wishlist(&self, _user_id: &UserId) -> Result<(), ApiError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_cancelled_place_order_clears_flag() {
        let mut session = staged_session();

        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            place_order(&mut session, &StalledMarketplace, rate()),
        )
        .await;

        assert!(timed_out.is_err());
        assert!(!session.is_submitting());
        assert_eq!(session.staging().len(), 2);
        assert!(session.orders().is_empty());
    }

    #[test]
    fn test_pending_checkout_preview() {
        let mut session = staged_session();
        let pending = begin_checkout(&mut session, rate()).unwrap();

        assert_eq!(pending.earned(), Decimal::new(125, 2));
        assert_eq!(pending.balance(), Decimal::new(1125, 2));
    }
}
