//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_CAPACITY, DEFAULT_TTL_MS};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of cached product records
    pub cache_capacity: usize,
    /// Product cache entry lifetime in milliseconds
    pub cache_ttl_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    pub customer_table: String,
    pub order_table: String,
    pub product_table: String,
    /// Clear and seed the tables before serving
    pub populate_on_start: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cached products (default: 500)
    /// - `CACHE_TTL_MS` - Cache entry lifetime in ms (default: 60000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CUSTOMER_TABLE` / `ORDER_TABLE` / `PRODUCT_TABLE` - table names
    /// - `POPULATE_ON_START` - seed test data at startup (default: true)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.cache_capacity),
            cache_ttl_ms: parse_var("CACHE_TTL_MS").unwrap_or(defaults.cache_ttl_ms),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            customer_table: env::var("CUSTOMER_TABLE").unwrap_or(defaults.customer_table),
            order_table: env::var("ORDER_TABLE").unwrap_or(defaults.order_table),
            product_table: env::var("PRODUCT_TABLE").unwrap_or(defaults.product_table),
            populate_on_start: parse_var("POPULATE_ON_START")
                .unwrap_or(defaults.populate_on_start),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CAPACITY,
            cache_ttl_ms: DEFAULT_TTL_MS,
            server_port: 3000,
            customer_table: "customers".to_string(),
            order_table: "orders".to_string(),
            product_table: "products".to_string(),
            populate_on_start: true,
        }
    }
}
