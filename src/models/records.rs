//! Table records
//!
//! Items stored in the customer, order and product tables.

use serde::{Deserialize, Serialize};

use crate::table::Record;

/// A customer, keyed by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub email: String,
    pub full_name: String,
}

impl Record for Customer {
    fn primary_key(&self) -> &str {
        &self.email
    }
}

/// Product catalog item, keyed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
}

impl Record for Product {
    fn primary_key(&self) -> &str {
        &self.id
    }
}

/// One line of an order.
///
/// Lines sharing an `id` belong to the same order. The table is keyed by
/// `line_id` and queried by customer email plus order date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub line_id: String,
    /// Order id
    pub id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub email: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Sale price recorded on the line, used when the product is gone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub total_amount: f64,
}

impl Record for OrderLine {
    fn primary_key(&self) -> &str {
        &self.line_id
    }

    fn partition_key(&self) -> &str {
        &self.email
    }

    fn sort_key(&self) -> Option<&str> {
        Some(&self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_line_deserialize_camel_case() {
        let json = r#"{
            "lineId": "1",
            "id": "order1",
            "date": "2022-01-01",
            "email": "johndoe@example.com",
            "fullName": "John Doe",
            "productId": "productA",
            "totalAmount": 175.0,
            "quantity": 3
        }"#;
        let line: OrderLine = serde_json::from_str(json).unwrap();

        assert_eq!(line.primary_key(), "1");
        assert_eq!(line.partition_key(), "johndoe@example.com");
        assert_eq!(line.sort_key(), Some("2022-01-01"));
        assert_eq!(line.quantity, Some(3));
        assert_eq!(line.price, None);
    }

    #[test]
    fn test_customer_keys() {
        let customer = Customer {
            email: "janedoe@example.com".to_string(),
            full_name: "Jane Doe".to_string(),
        };
        assert_eq!(customer.primary_key(), "janedoe@example.com");
        assert_eq!(customer.partition_key(), "janedoe@example.com");
        assert_eq!(customer.sort_key(), None);

        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["fullName"], "Jane Doe");
    }
}
