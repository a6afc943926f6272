//! # Vitrina Config
//!
//! Configuration management for the Vitrina catalog service.
//! Supports layered configuration from files and environment variables.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
