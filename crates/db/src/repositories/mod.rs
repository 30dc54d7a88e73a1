//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod product_repo;
pub mod special_price_repo;

pub use product_repo::ProductRepo;
pub use special_price_repo::SpecialPriceRepo;
