//! Catalog service implementations.

pub mod catalog_service_impl;

pub use catalog_service_impl::{CatalogServiceComponent, CatalogServiceImpl};
