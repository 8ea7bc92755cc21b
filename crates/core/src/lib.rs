//! Domain layer for the staff roster backend.
//!
//! Holds everything that is neither HTTP nor SQL: the role catalog, the two
//! roster kinds and their messages, form validation, upload checks,
//! pagination and the on-disk image store.

pub mod error;
pub mod hashing;
pub mod pagination;
pub mod roles;
pub mod roster;
pub mod search;
pub mod storage;
pub mod types;
pub mod upload;
pub mod validation;
