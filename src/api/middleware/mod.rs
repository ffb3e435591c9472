//! Request interceptors.

pub mod auth;
pub mod cookie;

pub use auth::{Authorizer, CredentialAuth, Decision, DenyReason, SessionAuth, enforce};
