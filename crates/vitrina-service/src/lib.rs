//! # Vitrina Service
//!
//! Service layer for the Vitrina catalog: the tiered response cache and
//! the catalog service that assembles localized, ordered pages.

pub mod cache;
pub mod catalog_service;
pub mod dto;
pub mod r#impl;
pub mod metrics;

pub use cache::*;
pub use catalog_service::*;
pub use dto::*;
pub use r#impl::*;
