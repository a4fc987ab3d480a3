//! A Rust-side identity provider built on Firebase's secure-token REST API.
//!
//! Useful for driving a [`RefreshCoordinator`](crate::refresh::RefreshCoordinator)
//! outside the browser, e.g. in CLIs or service-to-service clients holding a
//! user's refresh token.

mod client;
mod error;
mod session;

pub use client::*;
pub use error::SecureTokenError;
pub use session::*;
