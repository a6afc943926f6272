//! # Vitrina Core
//!
//! Core types shared by every layer of the Vitrina catalog service:
//! the error taxonomy, pagination, locale resolution, and the pure
//! catalog normalization and ordering functions whose output the
//! response cache stores and serves.

pub mod catalog;
pub mod error;
pub mod locale;
pub mod pagination;
pub mod result;

pub use catalog::*;
pub use error::*;
pub use locale::*;
pub use pagination::*;
pub use result::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
