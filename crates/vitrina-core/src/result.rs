//! Result type aliases for Vitrina.

use crate::VitrinaError;

/// A specialized `Result` type for Vitrina operations.
pub type VitrinaResult<T> = Result<T, VitrinaError>;
