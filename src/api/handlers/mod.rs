//! HTTP handlers, grouped by surface.

pub mod admin;
pub mod call;
pub mod health;
pub mod mobile;
pub mod numbers;
pub mod pages;
