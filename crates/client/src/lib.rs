//! Presentation-layer logic for the pricebook frontends.
//!
//! A typed HTTP client for the pricebook API plus the UI-agnostic state the
//! catalog view and the special-price upload form are built on: loaded data,
//! toasts, form validation, the debounced account probe and dropdown
//! filtering. Rendering is left to the embedding frontend.

pub mod api;
pub mod dropdown;
pub mod error;
pub mod form;
pub mod format;
pub mod probe;
pub mod state;
pub mod toast;

pub use api::{PricebookApi, PricebookClient};
pub use error::{ClientError, ClientResult};
