//! REST API controllers.

pub mod catalog_controller;
pub mod health_controller;

pub use health_controller::*;
