//! API Module
//!
//! HTTP admin surface over the process-wide fragment cache.
//!
//! # Endpoints
//! - `GET|PUT|DELETE /fragments/:name/:mode/:locale` - Single fragment
//! - `DELETE /fragments?prefix=P|name=N` - Bulk eviction
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
