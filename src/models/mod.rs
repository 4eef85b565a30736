//! Request and Response models for the admin API
//!
//! The cached `Fragment` type plus the DTOs serialized over HTTP.

pub mod fragment;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use fragment::Fragment;
pub use requests::{EvictQuery, GetQuery, PutRequest};
pub use responses::{
    ErrorResponse, EvictResponse, FragmentResponse, HealthResponse, PutResponse,
};
