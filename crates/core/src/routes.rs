//! Client route paths.
//!
//! Shared by anything that needs to link into the marketplace front end
//! (redirects after checkout, notices pointing at the wishlist, ...).

use crate::types::Role;

// Shopper routes
pub const HOME_ROUTE: &str = "/";
pub const ORDERS_ROUTE: &str = "/orders";
pub const CART_ROUTE: &str = "/cart";
pub const WISHLIST_ROUTE: &str = "/wishlist";
pub const CHECKOUT_ROUTE: &str = "/checkout";
pub const SEARCH_ROUTE: &str = "/search";
pub const HISTORY_ROUTE: &str = "/history";
pub const PROFILE_ROUTE: &str = "/profile";

// Vendor routes
pub const VENDOR_ROUTE: &str = "/vendor";
pub const VENDOR_NEW_PRODUCTS_ROUTE: &str = "/vendor/new-products";
pub const VENDOR_PRODUCTS_ROUTE: &str = "/vendor/products";

// Admin routes
pub const ADMIN_ROUTE: &str = "/admin";

// Auth routes
pub const AUTH_ROUTE: &str = "/auth";
pub const AUTH_USER_ROUTE: &str = "/auth/user";
pub const AUTH_ADMIN_ROUTE: &str = "/auth/admin";
pub const AUTH_VENDOR_ROUTE: &str = "/auth/vendor";

/// Login page for a role.
#[must_use]
pub const fn auth_route(role: Role) -> &'static str {
    match role {
        Role::User => AUTH_USER_ROUTE,
        Role::Vendor => AUTH_VENDOR_ROUTE,
        Role::Admin => AUTH_ADMIN_ROUTE,
    }
}

/// Landing page for a role after login.
#[must_use]
pub const fn home_route(role: Role) -> &'static str {
    match role {
        Role::User => HOME_ROUTE,
        Role::Vendor => VENDOR_ROUTE,
        Role::Admin => ADMIN_ROUTE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_routes_live_under_auth() {
        for role in [Role::User, Role::Vendor, Role::Admin] {
            assert!(auth_route(role).starts_with(AUTH_ROUTE));
        }
    }

    #[test]
    fn test_vendor_routes_nest() {
        assert!(VENDOR_PRODUCTS_ROUTE.starts_with(home_route(Role::Vendor)));
    }
}
