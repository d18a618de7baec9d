//! Linkmeter - A minimal URL shortener with Prometheus instrumentation
//!
//! Short codes live in memory only; every restart starts from an empty map.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **metrics**: Prometheus metrics export (default)
//!
//! # Architecture
//! - `storage`: In-memory link store
//! - `services`: Short code allocation and lookup
//! - `api`: HTTP services and middleware
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup

pub mod api;
pub mod config;
pub mod errors;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod metrics_core;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
