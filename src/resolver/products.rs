//! Product Lookup
//!
//! Cache-aside reads of product records.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, error};

use crate::cache::SharedCache;
use crate::error::{ResolverError, Result};
use crate::models::Product;
use crate::table::KeyValueTable;

/// Reads products through the shared product cache.
///
/// Only records that exist upstream are cached. A missing product or a
/// failed fetch leaves the cache untouched, so the next call asks the
/// table again.
#[derive(Clone)]
pub struct ProductLookup {
    cache: SharedCache<Product>,
    table: Arc<dyn KeyValueTable<Product>>,
}

impl ProductLookup {
    pub fn new(cache: SharedCache<Product>, table: Arc<dyn KeyValueTable<Product>>) -> Self {
        Self { cache, table }
    }

    pub fn cache(&self) -> &SharedCache<Product> {
        &self.cache
    }

    // == Get Product ==
    /// Returns the product with `id`, from cache when possible.
    pub async fn get_product(&self, id: &str) -> Result<Option<Product>> {
        if let Some(product) = self.cache.get(id) {
            debug!(id, "product cache hit");
            return Ok(Some(product));
        }

        match self.table.get(id).await {
            Ok(Some(product)) => {
                self.cache.set(id, product.clone());
                Ok(Some(product))
            }
            Ok(None) => {
                debug!(id, table = self.table.name(), "product not found");
                Ok(None)
            }
            Err(e) => {
                error!(id, table = self.table.name(), error = %e, "product fetch failed");
                Err(e.into())
            }
        }
    }

    // == Get Products ==
    /// Looks up several products concurrently. Duplicate ids are fetched
    /// once; every requested id appears in the result.
    pub async fn get_products<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<HashMap<String, Option<Product>>> {
        let mut unique: Vec<&str> = Vec::with_capacity(ids.len());
        for id in ids {
            let id = id.as_ref();
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        let found = try_join_all(unique.into_iter().map(|id| async move {
            let product = self.get_product(id).await?;
            Ok::<_, ResolverError>((id.to_string(), product))
        }))
        .await?;

        Ok(found.into_iter().collect())
    }
}

impl std::fmt::Debug for ProductLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductLookup")
            .field("table", &self.table.name())
            .field("cached", &self.cache.len())
            .finish()
    }
}
