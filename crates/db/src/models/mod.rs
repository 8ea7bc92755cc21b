//! Row structs and write DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create / update DTOs consumed by the matching repository

pub mod staff_member;
