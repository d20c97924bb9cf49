//! Order Resolver
//!
//! Dispatches resolver events and joins order lines with customer and
//! product records.

use std::collections::HashMap;

use tracing::{error, info};

use crate::error::{ResolverError, Result};
use crate::models::{
    Customer, FieldResult, Order, OrderLine, Product, ResolvedLine, ResolverEvent,
};
use crate::resolver::ProductLookup;
use crate::table::Tables;

/// Field served by [`OrderResolver::handle`]
pub const ORDERS_FIELD: &str = "orders";

/// Resolves the `orders` field.
#[derive(Debug, Clone)]
pub struct OrderResolver {
    tables: Tables,
    products: ProductLookup,
}

impl OrderResolver {
    pub fn new(tables: Tables, products: ProductLookup) -> Self {
        Self { tables, products }
    }

    pub fn products(&self) -> &ProductLookup {
        &self.products
    }

    // == Handle ==
    /// Resolves the field named by the event.
    pub async fn handle(&self, event: &ResolverEvent) -> Result<FieldResult> {
        match event.field_name() {
            ORDERS_FIELD => {
                let email = event.arguments.require_email()?;
                let order_date = event.arguments.order_date()?;
                info!(email, order_date = ?order_date, "resolving orders");
                let orders = self.get_orders(email, order_date).await?;
                Ok(FieldResult::Orders(orders))
            }
            other => Err(ResolverError::UnknownField(other.to_string())),
        }
    }

    // == Get Orders ==
    /// Orders placed by `email`, optionally only those on `order_date`.
    ///
    /// Lines are grouped by order id in the order the table returns them.
    pub async fn get_orders(&self, email: &str, order_date: Option<&str>) -> Result<Vec<Order>> {
        let lines = self
            .tables
            .orders
            .query(email, order_date)
            .await
            .map_err(|e| {
                error!(email, order_date = ?order_date, error = %e, "order query failed");
                e
            })?;

        if lines.is_empty() {
            return Ok(Vec::new());
        }

        let product_ids: Vec<&str> = lines
            .iter()
            .filter_map(|l| l.product_id.as_deref())
            .filter(|id| !id.is_empty())
            .collect();

        let customer_fut = async {
            self.tables.customers.get(email).await.map_err(|e| {
                error!(email, error = %e, "customer lookup failed");
                ResolverError::from(e)
            })
        };
        let (customer, products) =
            tokio::try_join!(customer_fut, self.products.get_products(&product_ids))?;

        Ok(group_lines(lines)
            .into_iter()
            .map(|lines| build_order(lines, customer.as_ref(), &products))
            .collect())
    }
}

/// Groups lines by order id, keeping first-seen order of ids and lines.
fn group_lines(lines: Vec<OrderLine>) -> Vec<Vec<OrderLine>> {
    let mut groups: Vec<Vec<OrderLine>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for line in lines {
        match index.get(&line.id) {
            Some(&i) => groups[i].push(line),
            None => {
                index.insert(line.id.clone(), groups.len());
                groups.push(vec![line]);
            }
        }
    }
    groups
}

fn build_order(
    lines: Vec<OrderLine>,
    customer: Option<&Customer>,
    products: &HashMap<String, Option<Product>>,
) -> Order {
    let head = &lines[0];
    let (id, date, email, full_name) = (
        head.id.clone(),
        head.date.clone(),
        head.email.clone(),
        head.full_name.clone(),
    );

    let lines: Vec<ResolvedLine> = lines
        .into_iter()
        .map(|line| {
            let product = line
                .product_id
                .as_ref()
                .and_then(|id| products.get(id).cloned().flatten());
            let price = product
                .as_ref()
                .map(|p| p.price)
                .or(line.price)
                .unwrap_or(0.0);
            let quantity = line.quantity.unwrap_or(1);
            ResolvedLine {
                line_id: line.line_id,
                product_id: line.product_id,
                product,
                quantity,
                price,
                amount: price * f64::from(quantity),
            }
        })
        .collect();

    let total_amount = lines.iter().map(|l| l.amount).sum();

    Order {
        id,
        date,
        email,
        full_name,
        customer: customer.cloned(),
        lines,
        total_amount,
    }
}
