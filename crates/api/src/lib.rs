//! HTTP layer: routes, handlers, error mapping, and server configuration.
//!
//! Exposed as a library so integration tests can build the exact router the
//! production binary serves.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;

pub use router::build_app_router;
