//! API Handlers
//!
//! HTTP request handlers for each resolver endpoint.

use axum::{extract::State, Json};
use tracing::info;

use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    FieldResult, HealthResponse, PopulateResponse, Product, ResolverEvent, StatsResponse,
};
use crate::resolver::{OrderResolver, ProductLookup};
use crate::seed::populate_tables;
use crate::table::Tables;

/// Application state shared across all handlers.
///
/// The product cache is created once here and lives as long as the
/// server; every request reuses it.
#[derive(Clone, Debug)]
pub struct AppState {
    pub tables: Tables,
    pub resolver: OrderResolver,
}

impl AppState {
    /// Wires the resolver to the given tables and product cache.
    pub fn new(tables: Tables, product_cache: SharedCache<Product>) -> Self {
        let products = ProductLookup::new(product_cache, tables.products.clone());
        Self {
            resolver: OrderResolver::new(tables.clone(), products),
            tables,
        }
    }

    /// Creates in-memory tables and a product cache from configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = SharedCache::new(config.cache_capacity, config.cache_ttl());
        Self::new(Tables::in_memory(config), cache)
    }

    pub fn product_cache(&self) -> &SharedCache<Product> {
        self.resolver.products().cache()
    }
}

/// Handler for POST /graphql
///
/// Resolves the field named in the event.
pub async fn graphql_handler(
    State(state): State<AppState>,
    Json(event): Json<ResolverEvent>,
) -> Result<Json<FieldResult>> {
    let result = state.resolver.handle(&event).await?;
    Ok(Json(result))
}

/// Handler for POST /populate
///
/// Reloads the demo data. Cached products may no longer match the table,
/// so the product cache is emptied before and after the reload.
///
/// A lookup that read the old table but had not yet stored its result when
/// the second clear ran can still cache a stale record for one TTL.
pub async fn populate_handler(State(state): State<AppState>) -> Result<Json<PopulateResponse>> {
    state.product_cache().clear();
    let response = populate_tables(&state.tables).await?;
    state.product_cache().clear();
    info!("product cache cleared around repopulating");
    Ok(Json(response))
}

/// Handler for GET /stats
///
/// Returns product cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.product_cache();
    Json(StatsResponse::new(cache.stats(), cache.capacity()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
