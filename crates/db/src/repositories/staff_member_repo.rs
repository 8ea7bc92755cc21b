//! Repository for the roster tables (`aparaturs`, `konselors`).
//!
//! Both tables share one schema, so every method takes the [`RosterKind`]
//! that selects the table. Table names come from a closed enum and are never
//! user input.

use sqlx::{PgConnection, PgExecutor, PgPool};
use roster_core::roster::RosterKind;
use roster_core::search::contains_pattern;
use roster_core::types::DbId;

use crate::models::staff_member::{CreateStaffMember, StaffMember, UpdateStaffMember};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, image, name, role, phone, created_at, updated_at";

/// Name filter shared by the listing queries. `$1` is an `ILIKE` pattern or
/// NULL for "no filter".
const NAME_FILTER: &str = "($1::text IS NULL OR name ILIKE $1)";

/// Name of the partial unique index guarding single-holder roles.
pub fn role_constraint_name(kind: RosterKind) -> String {
    format!("uq_{}_role", kind.table())
}

/// Whether `err` is a violation of a roster role-uniqueness index.
pub fn is_role_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err
                    .constraint()
                    .is_some_and(|c| RosterKind::ALL.iter().any(|k| c == role_constraint_name(*k)))
        }
        _ => false,
    }
}

/// Advisory lock key for a stored photo, scoped by roster directory.
pub fn image_lock_key(kind: RosterKind, image: &str) -> String {
    format!("{}/{image}", kind.storage_dir())
}

/// Provides CRUD and lookup operations for roster records.
pub struct StaffMemberRepo;

impl StaffMemberRepo {
    /// Insert a new record, returning the created row.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        kind: RosterKind,
        input: &CreateStaffMember,
    ) -> Result<StaffMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (image, name, role, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}",
            kind.table()
        );
        sqlx::query_as::<_, StaffMember>(&query)
            .bind(&input.image)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.phone)
            .fetch_one(executor)
            .await
    }

    /// Find a record by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        kind: RosterKind,
        id: DbId,
    ) -> Result<Option<StaffMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", kind.table());
        sqlx::query_as::<_, StaffMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of records, newest first, plus the total matching count.
    ///
    /// `search` is a plain substring; it is matched case-insensitively
    /// against `name`.
    pub async fn list_page(
        pool: &PgPool,
        kind: RosterKind,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<StaffMember>, i64), sqlx::Error> {
        let pattern = search.map(contains_pattern);

        let count_query = format!("SELECT COUNT(*) FROM {} WHERE {NAME_FILTER}", kind.table());
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM {}
             WHERE {NAME_FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3",
            kind.table()
        );
        let rows = sqlx::query_as::<_, StaffMember>(&query)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok((rows, total))
    }

    /// All matching records, oldest first.
    pub async fn list_oldest_first(
        pool: &PgPool,
        kind: RosterKind,
        search: Option<&str>,
    ) -> Result<Vec<StaffMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {}
             WHERE {NAME_FILTER}
             ORDER BY created_at ASC, id ASC",
            kind.table()
        );
        sqlx::query_as::<_, StaffMember>(&query)
            .bind(search.map(contains_pattern))
            .fetch_all(pool)
            .await
    }

    /// Find a record currently holding `role`, ignoring `exclude_id`.
    pub async fn find_role_holder(
        pool: &PgPool,
        kind: RosterKind,
        role: &str,
        exclude_id: Option<DbId>,
    ) -> Result<Option<StaffMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {}
             WHERE role = $1 AND ($2::bigint IS NULL OR id <> $2)
             ORDER BY id ASC
             LIMIT 1",
            kind.table()
        );
        sqlx::query_as::<_, StaffMember>(&query)
            .bind(role)
            .bind(exclude_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a record. Text fields are replaced; `image` only when `Some`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        kind: RosterKind,
        id: DbId,
        input: &UpdateStaffMember,
    ) -> Result<Option<StaffMember>, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET
                image = COALESCE($2, image),
                name = $3,
                role = $4,
                phone = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}",
            kind.table()
        );
        sqlx::query_as::<_, StaffMember>(&query)
            .bind(id)
            .bind(&input.image)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.phone)
            .fetch_optional(executor)
            .await
    }

    /// Delete a record by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, kind: RosterKind, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of records still pointing at a stored photo.
    pub async fn count_image_references<'e, E: PgExecutor<'e>>(
        executor: E,
        kind: RosterKind,
        image: &str,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM {} WHERE image = $1", kind.table());
        sqlx::query_scalar(&query).bind(image).fetch_one(executor).await
    }

    /// Take the transaction-scoped advisory lock for one stored photo.
    ///
    /// Held while a photo is written and a row starts referencing it, and
    /// while its references are counted before removal, so a photo is never
    /// removed between being claimed and being referenced. Released on
    /// commit or rollback.
    pub async fn lock_image(
        conn: &mut PgConnection,
        kind: RosterKind,
        image: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(image_lock_key(kind, image))
            .execute(conn)
            .await?;
        Ok(())
    }
}
