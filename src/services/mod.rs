//! Resource services.
//!
//! DESIGN
//! ======
//! One module per backend resource. Each function performs exactly one call
//! through the shared [`HttpClient`](crate::net::http::HttpClient), maps the
//! raw envelope into client models, and on failure logs at `error!` before
//! returning the unchanged [`ApiError`](crate::net::error::ApiError).

pub mod auth;
pub mod course;
pub mod enrollment;
pub mod lesson;
pub mod profile;
pub mod quiz;
