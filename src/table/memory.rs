//! In-memory table backed by a sorted map.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KeyValueTable, Record, StoreResult, WriteRequest};
use crate::error::StoreError;

/// Process-local table. Contents live as long as the value does.
#[derive(Debug)]
pub struct InMemoryTable<T> {
    name: String,
    items: RwLock<BTreeMap<String, T>>,
}

impl<T: Record> InMemoryTable<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    fn check_key(&self, key: &str) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey {
                table: self.name.clone(),
                reason: "key cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Record> KeyValueTable<T> for InMemoryTable<T> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &str) -> StoreResult<Option<T>> {
        self.check_key(key)?;
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn put(&self, item: T) -> StoreResult<()> {
        self.check_key(item.primary_key())?;
        let key = item.primary_key().to_string();
        self.items.write().await.insert(key, item);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<Option<T>> {
        self.check_key(key)?;
        Ok(self.items.write().await.remove(key))
    }

    async fn query(&self, partition: &str, sort: Option<&str>) -> StoreResult<Vec<T>> {
        self.check_key(partition)?;
        let items = self.items.read().await;
        Ok(items
            .values()
            .filter(|item| item.partition_key() == partition)
            .filter(|item| sort.map_or(true, |s| item.sort_key() == Some(s)))
            .cloned()
            .collect())
    }

    async fn scan(&self) -> StoreResult<Vec<T>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn batch_write(&self, requests: Vec<WriteRequest<T>>) -> StoreResult<()> {
        for request in &requests {
            match request {
                WriteRequest::Put(item) => self.check_key(item.primary_key())?,
                WriteRequest::Delete(key) => self.check_key(key)?,
            }
        }

        let mut items = self.items.write().await;
        for request in requests {
            match request {
                WriteRequest::Put(item) => {
                    items.insert(item.primary_key().to_string(), item);
                }
                WriteRequest::Delete(key) => {
                    items.remove(&key);
                }
            }
        }
        Ok(())
    }
}
