//! # usersearch
//!
//! A small client/server pair for searching a user directory.
//!
//! ## Server
//!
//! [`server`] exposes `GET /` over an immutable [`directory::Directory`] that is
//! loaded once at startup. Each request is authenticated with the `AccessToken`
//! header and then runs through the [`search`] pipeline:
//!
//! 1. **Filter:** keep users whose name or about text contains `query`.
//! 2. **Sort:** by `Id`, `Age` or `Name` (the default), ascending for `order_by=1`,
//!    descending for `order_by=-1`, untouched for `order_by=0`.
//! 3. **Paginate:** skip `offset` records and return at most `limit` of them; a
//!    `limit` of zero returns the whole tail.
//!
//! Failures are answered with `400` and a `{"Error": "<code>"}` body drawn from
//! the closed [`model::ErrorCode`] set, `401` for a bad token and `500` when the
//! directory cannot be read.
//!
//! ## Client
//!
//! [`client::SearchClient`] validates requests before sending them and maps
//! every response into a [`model::SearchResponse`] or a typed
//! [`client::ClientError`]. Nothing is retried.

pub mod cli;
pub mod client;
pub mod directory;
pub mod model;
pub mod search;
pub mod server;

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_user_agent() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
