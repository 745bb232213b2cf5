//! Shared core for the ClickDelivery Rust client
//!
//! This crate holds what every other part of the client agrees on: the
//! entity models, the uniform API error shape, the process-wide session
//! store, and the cart.

pub mod cart;
pub mod error;
pub mod models;
pub mod session;

pub use cart::Cart;
pub use error::{ApiError, ApiResult};
pub use session::SessionStore;
