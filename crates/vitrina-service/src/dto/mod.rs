//! Data Transfer Objects (DTOs).

mod catalog_dto;

pub use catalog_dto::*;
