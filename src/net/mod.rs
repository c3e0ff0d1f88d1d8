//! Networking: the shared HTTP adapter and the backend wire schema.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` performs requests, `types` describes raw responses, `mapping` turns
//! them into `crate::models`, and `error` classifies failures.

pub mod error;
pub mod http;
pub mod mapping;
pub mod types;

pub use error::ApiError;
pub use http::{HttpClient, Method, Payload, RequestOptions, Upload};
