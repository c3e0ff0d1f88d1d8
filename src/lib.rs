//! Client-side data access and session state for the learning platform.
//!
//! ARCHITECTURE
//! ============
//! Leaves first: `config` and `state::storage`, then the `net` adapter and
//! wire schema, the per-resource `services`, the session and selection
//! stores, the `router` guard, and finally `context`, which wires them
//! together for a front end.

pub mod config;
pub mod context;
pub mod models;
pub mod net;
pub mod router;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_support;

pub use config::ClientConfig;
pub use context::AppContext;
pub use net::error::ApiError;
