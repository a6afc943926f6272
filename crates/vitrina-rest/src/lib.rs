//! # Vitrina REST
//!
//! REST API layer using Axum for Vitrina.
//! Serves cached, localized catalog listings and products plus health checks.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
