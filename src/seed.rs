//! Populate Routine
//!
//! Clears the three tables and loads the demo data set. Run at startup
//! when `POPULATE_ON_START` is set, or on demand via `POST /populate`.

use tracing::{debug, info};

use crate::error::Result;
use crate::models::{Customer, OrderLine, PopulateResponse, Product};
use crate::table::{KeyValueTable, Record, StoreResult, Tables, WriteRequest};

pub fn seed_customers() -> Vec<Customer> {
    vec![
        Customer {
            email: "johndoe@example.com".to_string(),
            full_name: "John Doe".to_string(),
        },
        Customer {
            email: "janedoe@example.com".to_string(),
            full_name: "Jane Doe".to_string(),
        },
    ]
}

pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "productA".to_string(),
            name: "Product A".to_string(),
            price: 50.0,
        },
        Product {
            id: "productB".to_string(),
            name: "Product B".to_string(),
            price: 25.0,
        },
    ]
}

pub fn seed_order_lines() -> Vec<OrderLine> {
    let line = |line_id: &str, id: &str, date: &str, who: (&str, &str), product: &str, qty: u32, total: f64| {
        OrderLine {
            line_id: line_id.to_string(),
            id: id.to_string(),
            date: date.to_string(),
            email: who.0.to_string(),
            full_name: who.1.to_string(),
            product_id: Some(product.to_string()),
            quantity: Some(qty),
            price: None,
            total_amount: total,
        }
    };
    let john = ("johndoe@example.com", "John Doe");
    let jane = ("janedoe@example.com", "Jane Doe");

    vec![
        line("1", "order1", "2022-01-01", john, "productA", 3, 175.0),
        line("2", "order1", "2022-01-01", john, "productB", 1, 175.0),
        line("3", "order2", "2022-01-02", jane, "productB", 5, 125.0),
        line("4", "order3", "2022-01-05", john, "productB", 2, 50.0),
    ]
}

// == Populate ==
/// Empties every table, then writes the seed data.
pub async fn populate_tables(tables: &Tables) -> Result<PopulateResponse> {
    info!(
        customers = tables.customers.name(),
        orders = tables.orders.name(),
        products = tables.products.name(),
        "clearing tables"
    );
    tokio::try_join!(
        clear_table(tables.customers.as_ref()),
        clear_table(tables.orders.as_ref()),
        clear_table(tables.products.as_ref()),
    )?;

    let customers = seed_customers();
    let products = seed_products();
    let order_lines = seed_order_lines();
    let counts = (customers.len(), products.len(), order_lines.len());

    tokio::try_join!(
        put_all(tables.customers.as_ref(), customers),
        put_all(tables.orders.as_ref(), order_lines),
        put_all(tables.products.as_ref(), products),
    )?;

    info!("test data populated");
    Ok(PopulateResponse {
        status_code: 200,
        message: "Tables populated with test data.".to_string(),
        customers: counts.0,
        products: counts.1,
        order_lines: counts.2,
    })
}

/// Deletes every item. Returns how many were removed.
async fn clear_table<T: Record>(table: &dyn KeyValueTable<T>) -> StoreResult<usize> {
    let deletes: Vec<WriteRequest<T>> = table
        .scan()
        .await?
        .iter()
        .map(|item| WriteRequest::Delete(item.primary_key().to_string()))
        .collect();

    let count = deletes.len();
    if count > 0 {
        table.batch_write(deletes).await?;
    }
    debug!(table = table.name(), removed = count, "table cleared");
    Ok(count)
}

async fn put_all<T: Record>(table: &dyn KeyValueTable<T>, items: Vec<T>) -> StoreResult<()> {
    debug!(table = table.name(), count = items.len(), "writing items");
    table
        .batch_write(items.into_iter().map(WriteRequest::Put).collect())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_populate_fills_tables() {
        let tables = Tables::in_memory(&Config::default());

        let response = populate_tables(&tables).await.unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.message, "Tables populated with test data.");
        assert_eq!(tables.customers.scan().await.unwrap().len(), 2);
        assert_eq!(tables.products.scan().await.unwrap().len(), 2);
        assert_eq!(tables.orders.scan().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_populate_replaces_existing_items() {
        let tables = Tables::in_memory(&Config::default());
        tables
            .products
            .put(Product {
                id: "stale".to_string(),
                name: "Stale".to_string(),
                price: 1.0,
            })
            .await
            .unwrap();

        populate_tables(&tables).await.unwrap();
        populate_tables(&tables).await.unwrap();

        assert_eq!(tables.products.get("stale").await.unwrap(), None);
        assert_eq!(tables.products.scan().await.unwrap().len(), 2);
    }

    #[test]
    fn test_seed_totals_match_lines() {
        let products = seed_products();
        let price = |id: &str| products.iter().find(|p| p.id == id).map(|p| p.price).unwrap();

        for line in seed_order_lines() {
            let order_total: f64 = seed_order_lines()
                .iter()
                .filter(|l| l.id == line.id)
                .map(|l| price(l.product_id.as_deref().unwrap()) * f64::from(l.quantity.unwrap()))
                .sum();
            assert_eq!(order_total, line.total_amount, "order {}", line.id);
        }
    }
}
