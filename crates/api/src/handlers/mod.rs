//! Request handlers for the roster resources.
//!
//! Handlers delegate to `StaffMemberRepo` in `roster_db`, shape results
//! into the response envelope and map errors via [`crate::error::AppError`].

pub mod admin;
pub mod public;
