//! Records, requests and responses
//!
//! Table items plus the DTOs used for serializing/deserializing HTTP
//! request and response bodies.

pub mod records;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use records::{Customer, OrderLine, Product};
pub use requests::{Arguments, FieldInfo, ResolverEvent};
pub use responses::{
    ErrorResponse, FieldResult, HealthResponse, Order, PopulateResponse, ResolvedLine,
    StatsResponse,
};
