//! Request extractors.

pub mod auth;
pub mod numbers;

pub use auth::{AuthContext, Policy};
pub use numbers::NumbersPayload;
