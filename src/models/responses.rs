//! Response DTOs for the resolver API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::{Customer, Product};

/// An order with its customer and priced lines stitched in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub date: String,
    pub email: String,
    pub full_name: String,
    /// `None` when the customer record no longer exists
    pub customer: Option<Customer>,
    pub lines: Vec<ResolvedLine>,
    /// Sum of line amounts
    pub total_amount: f64,
}

/// One order line joined with its product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLine {
    pub line_id: String,
    pub product_id: Option<String>,
    pub product: Option<Product>,
    pub quantity: u32,
    /// Unit price used for the amount
    pub price: f64,
    pub amount: f64,
}

/// Result of resolving one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldResult {
    Orders(Vec<Order>),
}

/// Response body for the populate routine (POST /populate)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulateResponse {
    pub status_code: u16,
    pub message: String,
    pub customers: usize,
    pub products: usize,
    pub order_lines: usize,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: CacheStats, capacity: usize) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
            capacity,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
