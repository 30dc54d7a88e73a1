//! Domain layer for the pricebook service.
//!
//! Holds the catalog and special-price account types, key normalization,
//! request validation, the store traits the persistence layer implements,
//! and the [`service::ResolutionService`] that ties them together.

pub mod account;
pub mod catalog;
pub mod error;
pub mod keys;
pub mod memory;
pub mod pricing;
pub mod requests;
pub mod service;
pub mod store;
pub mod types;
