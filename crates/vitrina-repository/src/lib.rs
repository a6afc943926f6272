//! # Vitrina Repository
//!
//! Read-only access to the upstream catalog store. Records come back raw;
//! locale projection and ordering happen in the service layer.
//!
//! ```text
//! CatalogService
//!   ↓  Arc<dyn CatalogRepository>
//! FileCatalogRepository | InMemoryCatalogRepository
//! ```

mod file_repository;
mod memory_repository;
pub mod traits;

pub use file_repository::*;
pub use memory_repository::*;
pub use traits::*;
