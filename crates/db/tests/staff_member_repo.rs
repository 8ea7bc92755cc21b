//! Integration tests for `StaffMemberRepo` against a real database.
//!
//! - CRUD on both roster tables
//! - Search, ordering and paging
//! - Role holder lookups and the unique-role index
//! - Image reference counting and the per-photo lock

use assert_matches::assert_matches;
use roster_core::roster::RosterKind;
use roster_db::models::staff_member::{CreateStaffMember, UpdateStaffMember};
use roster_db::repositories::staff_member_repo::is_role_conflict;
use roster_db::repositories::StaffMemberRepo;
use sqlx::PgPool;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_member(name: &str, role: &str, image: &str) -> CreateStaffMember {
    CreateStaffMember {
        image: image.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        phone: "081234567890".to_string(),
    }
}

const MEMBER_ROLE: &str = "Pengembangan SDM - Anggota";

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find(pool: PgPool) {
    let created = StaffMemberRepo::create(
        &pool,
        RosterKind::Aparatur,
        &new_member("Budi", "Ketua", "a.png"),
    )
    .await
    .unwrap();

    assert_eq!(created.name, "Budi");
    assert_eq!(created.role, "Ketua");
    assert_eq!(created.image, "a.png");

    let found = StaffMemberRepo::find_by_id(&pool, RosterKind::Aparatur, created.id)
        .await
        .unwrap();
    assert_eq!(found, Some(created.clone()));

    // Tables are independent.
    let other = StaffMemberRepo::find_by_id(&pool, RosterKind::Konselor, created.id)
        .await
        .unwrap();
    assert!(other.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_keeps_image_when_none(pool: PgPool) {
    let kind = RosterKind::Konselor;
    let created = StaffMemberRepo::create(&pool, kind, &new_member("Siti", "Ketua", "old.png"))
        .await
        .unwrap();

    let updated = StaffMemberRepo::update(
        &pool,
        kind,
        created.id,
        &UpdateStaffMember {
            image: None,
            name: "Siti Aminah".into(),
            role: "Wakil Ketua".into(),
            phone: "0899".into(),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.image, "old.png");
    assert_eq!(updated.name, "Siti Aminah");
    assert_eq!(updated.role, "Wakil Ketua");
    assert_eq!(updated.phone, "0899");
    assert!(updated.updated_at >= created.updated_at);

    let replaced = StaffMemberRepo::update(
        &pool,
        kind,
        created.id,
        &UpdateStaffMember {
            image: Some("new.png".into()),
            name: "Siti Aminah".into(),
            role: "Wakil Ketua".into(),
            phone: "0899".into(),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(replaced.image, "new.png");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_returns_none(pool: PgPool) {
    let result = StaffMemberRepo::update(
        &pool,
        RosterKind::Aparatur,
        999_999,
        &UpdateStaffMember {
            image: None,
            name: "x".into(),
            role: "Ketua".into(),
            phone: "1".into(),
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete(pool: PgPool) {
    let kind = RosterKind::Aparatur;
    let created = StaffMemberRepo::create(&pool, kind, &new_member("Budi", "Ketua", "a.png"))
        .await
        .unwrap();

    assert!(StaffMemberRepo::delete(&pool, kind, created.id).await.unwrap());
    assert!(!StaffMemberRepo::delete(&pool, kind, created.id).await.unwrap());
    assert!(StaffMemberRepo::find_by_id(&pool, kind, created.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_page_newest_first_with_total(pool: PgPool) {
    let kind = RosterKind::Aparatur;
    for i in 0..7 {
        StaffMemberRepo::create(&pool, kind, &new_member(&format!("M{i}"), MEMBER_ROLE, "a.png"))
            .await
            .unwrap();
    }

    let (first, total) = StaffMemberRepo::list_page(&pool, kind, None, 5, 0)
        .await
        .unwrap();
    assert_eq!(total, 7);
    let names: Vec<_> = first.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["M6", "M5", "M4", "M3", "M2"]);

    let (second, _) = StaffMemberRepo::list_page(&pool, kind, None, 5, 5)
        .await
        .unwrap();
    let names: Vec<_> = second.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["M1", "M0"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_is_case_insensitive_substring(pool: PgPool) {
    let kind = RosterKind::Konselor;
    for name in ["Budi Santoso", "Ani", "BUDIMAN", "Sari"] {
        StaffMemberRepo::create(&pool, kind, &new_member(name, MEMBER_ROLE, "a.png"))
            .await
            .unwrap();
    }

    let all = StaffMemberRepo::list_oldest_first(&pool, kind, Some("budi"))
        .await
        .unwrap();
    let names: Vec<_> = all.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Budi Santoso", "BUDIMAN"]);

    let (page, total) = StaffMemberRepo::list_page(&pool, kind, Some("budi"), 5, 0)
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(page[0].name, "BUDIMAN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_treats_wildcards_literally(pool: PgPool) {
    let kind = RosterKind::Aparatur;
    for name in ["100% Budi", "Budi"] {
        StaffMemberRepo::create(&pool, kind, &new_member(name, MEMBER_ROLE, "a.png"))
            .await
            .unwrap();
    }

    let found = StaffMemberRepo::list_oldest_first(&pool, kind, Some("%"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "100% Budi");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_oldest_first_without_search(pool: PgPool) {
    let kind = RosterKind::Aparatur;
    for name in ["A", "B", "C"] {
        StaffMemberRepo::create(&pool, kind, &new_member(name, MEMBER_ROLE, "a.png"))
            .await
            .unwrap();
    }
    let all = StaffMemberRepo::list_oldest_first(&pool, kind, None)
        .await
        .unwrap();
    let names: Vec<_> = all.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_role_holder_excludes_self(pool: PgPool) {
    let kind = RosterKind::Aparatur;
    let ketua = StaffMemberRepo::create(&pool, kind, &new_member("Budi", "Ketua", "a.png"))
        .await
        .unwrap();

    let holder = StaffMemberRepo::find_role_holder(&pool, kind, "Ketua", None)
        .await
        .unwrap();
    assert_eq!(holder.map(|m| m.id), Some(ketua.id));

    let other = StaffMemberRepo::find_role_holder(&pool, kind, "Ketua", Some(ketua.id))
        .await
        .unwrap();
    assert!(other.is_none());

    let konselor = StaffMemberRepo::find_role_holder(&pool, RosterKind::Konselor, "Ketua", None)
        .await
        .unwrap();
    assert!(konselor.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_role_index_rejects_second_holder(pool: PgPool) {
    let kind = RosterKind::Konselor;
    StaffMemberRepo::create(&pool, kind, &new_member("A", "Bendahara", "a.png"))
        .await
        .unwrap();

    let err = StaffMemberRepo::create(&pool, kind, &new_member("B", "Bendahara", "b.png"))
        .await
        .unwrap_err();
    assert!(is_role_conflict(&err), "unexpected error: {err}");

    // Member roles accept many holders.
    for name in ["C", "D"] {
        StaffMemberRepo::create(&pool, kind, &new_member(name, MEMBER_ROLE, "c.png"))
            .await
            .unwrap();
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_into_taken_role_is_conflict(pool: PgPool) {
    let kind = RosterKind::Aparatur;
    StaffMemberRepo::create(&pool, kind, &new_member("A", "Ketua", "a.png"))
        .await
        .unwrap();
    let b = StaffMemberRepo::create(&pool, kind, &new_member("B", "Sekretaris", "b.png"))
        .await
        .unwrap();

    let result = StaffMemberRepo::update(
        &pool,
        kind,
        b.id,
        &UpdateStaffMember {
            image: None,
            name: "B".into(),
            role: "Ketua".into(),
            phone: "1".into(),
        },
    )
    .await;
    assert_matches!(result, Err(ref e) if is_role_conflict(e));
}

// ---------------------------------------------------------------------------
// Image references
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_count_image_references(pool: PgPool) {
    let kind = RosterKind::Aparatur;
    StaffMemberRepo::create(&pool, kind, &new_member("A", MEMBER_ROLE, "shared.png"))
        .await
        .unwrap();
    let b = StaffMemberRepo::create(&pool, kind, &new_member("B", MEMBER_ROLE, "shared.png"))
        .await
        .unwrap();

    let count = StaffMemberRepo::count_image_references(&pool, kind, "shared.png")
        .await
        .unwrap();
    assert_eq!(count, 2);

    StaffMemberRepo::delete(&pool, kind, b.id).await.unwrap();
    let count = StaffMemberRepo::count_image_references(&pool, kind, "shared.png")
        .await
        .unwrap();
    assert_eq!(count, 1);

    let none = StaffMemberRepo::count_image_references(&pool, RosterKind::Konselor, "shared.png")
        .await
        .unwrap();
    assert_eq!(none, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_image_lock_is_held_until_commit(pool: PgPool) {
    let kind = RosterKind::Aparatur;
    let mut first = pool.begin().await.unwrap();
    StaffMemberRepo::lock_image(&mut first, kind, "held.png").await.unwrap();

    let waiter_pool = pool.clone();
    let waiter = tokio::spawn(async move {
        let mut second = waiter_pool.begin().await.unwrap();
        StaffMemberRepo::lock_image(&mut second, kind, "held.png").await.unwrap();
        second.commit().await.unwrap();
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!waiter.is_finished(), "second lock on the same photo was granted");

    // Other photos, and the same name in the other roster, are independent.
    let mut other = pool.begin().await.unwrap();
    StaffMemberRepo::lock_image(&mut other, kind, "other.png").await.unwrap();
    StaffMemberRepo::lock_image(&mut other, RosterKind::Konselor, "held.png")
        .await
        .unwrap();
    other.commit().await.unwrap();

    first.commit().await.unwrap();
    tokio::time::timeout(Duration::from_secs(5), waiter)
        .await
        .expect("lock not granted after commit")
        .unwrap();
}
