//! API Module
//!
//! HTTP handlers and routing for the resolver.
//!
//! # Endpoints
//! - `POST /graphql` - Resolve one field
//! - `POST /populate` - Reload the demo data
//! - `GET /stats` - Product cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
