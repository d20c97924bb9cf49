//! Order Resolver - customer orders over key-value tables
//!
//! Resolves the `orders` field by joining order lines with customer and
//! product records. Product reads go through an in-memory LRU cache with
//! TTL expiry.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
pub mod seed;
pub mod table;

pub use api::AppState;
pub use config::Config;
