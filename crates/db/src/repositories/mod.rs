//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or, for writes that join a transaction, any
//! Postgres executor) as the first argument.

pub mod staff_member_repo;

pub use staff_member_repo::StaffMemberRepo;
