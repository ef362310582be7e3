//! API handlers for Gatekeeper.
//!
//! `/` and `/login` render HTML; `/logout` only redirects; `/health` reports JSON.

pub mod auth;
pub mod health;
pub mod root;
