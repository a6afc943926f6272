//! # Vitrina Server Library
//!
//! Composition root for the Vitrina catalog server: dependency injection
//! wiring and startup utilities.

pub mod di;
pub mod startup;
