//! Service layer for business logic
//!
//! HTTP handlers stay thin and delegate shortening, redirect lookup, listing
//! and deletion to `LinkService`.

mod link_service;

pub use link_service::*;
