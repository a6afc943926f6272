//! Custom Axum extractors.

mod catalog_params;
mod locale;

pub use catalog_params::*;
pub use locale::*;
