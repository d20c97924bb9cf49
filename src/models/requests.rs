//! Request DTOs for the resolver API
//!
//! Defines the structure of incoming resolver events.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{ResolverError, Result};

/// Date format of the `orderDate` argument
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Request body for POST /graphql
///
/// One event names one field and carries that field's arguments.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverEvent {
    pub info: FieldInfo,
    #[serde(default)]
    pub arguments: Arguments,
}

/// Which field is being resolved.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    pub field_name: String,
}

/// Named arguments. Both are optional on the wire; each field decides
/// which it requires.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arguments {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub order_date: Option<String>,
}

impl ResolverEvent {
    /// Builds an event, mostly useful in tests.
    pub fn new(field_name: impl Into<String>, arguments: Arguments) -> Self {
        Self {
            info: FieldInfo {
                field_name: field_name.into(),
            },
            arguments,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.info.field_name
    }
}

impl Arguments {
    pub fn orders(email: impl Into<String>, order_date: Option<&str>) -> Self {
        Self {
            email: Some(email.into()),
            order_date: order_date.map(str::to_string),
        }
    }

    /// Returns the trimmed email, rejecting a missing or blank one.
    pub fn require_email(&self) -> Result<&str> {
        match self.email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => Ok(email),
            _ => Err(ResolverError::MissingArgument("email")),
        }
    }

    /// Returns the order date if given, checking it is a calendar date.
    pub fn order_date(&self) -> Result<Option<&str>> {
        let Some(date) = self.order_date.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if date.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(date, ORDER_DATE_FORMAT).map_err(|e| {
            ResolverError::InvalidArgument {
                name: "orderDate",
                reason: format!("expected YYYY-MM-DD ({})", e),
            }
        })?;
        Ok(Some(date))
    }
}
