//! Mode routing
//!
//! Only the HTTP server mode exists; it is gated behind the `server` feature.

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "server")]
pub use server::run_server;
