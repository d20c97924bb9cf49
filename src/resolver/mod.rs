//! Resolver Module
//!
//! Field dispatch, order joins and cached product lookups.

mod orders;
mod products;

pub use orders::{OrderResolver, ORDERS_FIELD};
pub use products::ProductLookup;
