//! Pricebook API server library.
//!
//! Exposes config, state, error handling, routes and startup wiring so the
//! binary entrypoint and integration tests build the exact same app.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod startup;
pub mod state;
