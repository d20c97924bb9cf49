//! Table Module
//!
//! Key-value tables the resolver reads from and the populate routine
//! writes to.

mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::StoreError;
use crate::models::{Customer, OrderLine, Product};

pub use memory::InMemoryTable;

/// Result type for table operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Record ==
/// An item that can be stored in a table.
///
/// `primary_key` identifies the item. `partition_key` and `sort_key` are
/// what `query` matches on; by default the partition is the primary key
/// and there is no sort key.
pub trait Record: Clone + Send + Sync + 'static {
    fn primary_key(&self) -> &str;

    fn partition_key(&self) -> &str {
        self.primary_key()
    }

    fn sort_key(&self) -> Option<&str> {
        None
    }
}

// == Write Request ==
/// One operation of a batch write.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteRequest<T> {
    Put(T),
    /// Delete by primary key
    Delete(String),
}

// == Key-Value Table ==
/// A key-value table supporting get/put/query/scan/batch-write.
#[async_trait]
pub trait KeyValueTable<T: Record>: Send + Sync {
    /// Table name, used in logs and errors.
    fn name(&self) -> &str;

    /// Fetches one item by primary key.
    async fn get(&self, key: &str) -> StoreResult<Option<T>>;

    /// Inserts or replaces an item.
    async fn put(&self, item: T) -> StoreResult<()>;

    /// Removes an item, returning it if it existed.
    async fn delete(&self, key: &str) -> StoreResult<Option<T>>;

    /// Items in `partition`, optionally narrowed to one sort key value,
    /// ordered by primary key.
    async fn query(&self, partition: &str, sort: Option<&str>) -> StoreResult<Vec<T>>;

    /// Every item, ordered by primary key.
    async fn scan(&self) -> StoreResult<Vec<T>>;

    /// Applies all requests, or none if any is invalid.
    async fn batch_write(&self, requests: Vec<WriteRequest<T>>) -> StoreResult<()>;
}

// == Tables ==
/// The three tables behind the orders API.
#[derive(Clone)]
pub struct Tables {
    pub customers: Arc<dyn KeyValueTable<Customer>>,
    pub orders: Arc<dyn KeyValueTable<OrderLine>>,
    pub products: Arc<dyn KeyValueTable<Product>>,
}

impl Tables {
    /// Empty in-memory tables named after the configuration.
    pub fn in_memory(config: &Config) -> Self {
        Self {
            customers: Arc::new(InMemoryTable::<Customer>::new(&config.customer_table)),
            orders: Arc::new(InMemoryTable::<OrderLine>::new(&config.order_table)),
            products: Arc::new(InMemoryTable::<Product>::new(&config.product_table)),
        }
    }
}

impl std::fmt::Debug for Tables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tables")
            .field("customers", &self.customers.name())
            .field("orders", &self.orders.name())
            .field("products", &self.products.name())
            .finish()
    }
}
