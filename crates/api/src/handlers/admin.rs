//! Admin handlers for the roster resources.
//!
//! Mounted once per [`RosterKind`] at `/api/admin/{aparaturs,konselors}`;
//! the kind reaches the handler through an `Extension` layer on the
//! per-kind router.

use axum::extract::{Multipart, OriginalUri, Path, Query, State};
use axum::{Extension, Json};
use roster_core::pagination::{resolve_page, Page, PageRequest, ADMIN_PER_PAGE};
use roster_core::roster::RosterKind;
use roster_core::search::normalize_term;
use roster_core::types::DbId;
use roster_core::upload::{check_image, AcceptedImage};
use roster_core::validation::{
    required_message, upload_problem_message, FieldErrors, StaffForm, FIELD_IMAGE, FIELD_ROLE,
    ROLE_TAKEN_MESSAGE,
};
use roster_db::models::staff_member::{CreateStaffMember, UpdateStaffMember};
use roster_db::repositories::staff_member_repo::is_role_conflict;
use roster_db::repositories::StaffMemberRepo;

use crate::error::{AppError, AppResult};
use crate::form::StaffUpload;
use crate::query::ListParams;
use crate::response::{ApiResource, StaffMemberResource};
use crate::state::AppState;

type RecordResponse = Json<ApiResource<StaffMemberResource>>;

/// GET /api/admin/{roster}?search=&page=
///
/// Newest first, five per page. The search term is carried into every page
/// link.
pub async fn list(
    State(state): State<AppState>,
    Extension(kind): Extension<RosterKind>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ApiResource<Page<StaffMemberResource>>>> {
    let search = normalize_term(params.search.as_deref());
    let path = format!("{}{}", state.config.app_url, uri.path());
    let request = PageRequest {
        path: &path,
        page: resolve_page(params.page.as_deref()),
        per_page: ADMIN_PER_PAGE,
        search,
    };

    let (rows, total) = StaffMemberRepo::list_page(
        &state.pool,
        kind,
        search,
        request.per_page,
        request.offset(),
    )
    .await?;

    let app_url = &state.config.app_url;
    let page = Page::new(rows, total, &request)
        .map(|row| StaffMemberResource::new(kind, app_url, row));

    Ok(Json(ApiResource::ok(kind.messages().admin_list, page)))
}

/// POST /api/admin/{roster}
///
/// Multipart form with `image`, `name`, `role`, `phone`. All four are
/// required.
pub async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<RosterKind>,
    multipart: Multipart,
) -> AppResult<RecordResponse> {
    let StaffUpload { form, image } = StaffUpload::from_multipart(multipart).await?;

    let image = validate_submission(&state, kind, &form, image, None, true)
        .await?
        .ok_or_else(|| AppError::InternalError("Accepted create without an image".into()))?;

    // The photo lock is held from writing the file until the row that
    // references it is committed.
    let mut tx = state.pool.begin().await?;
    StaffMemberRepo::lock_image(&mut tx, kind, &image.stored_name()).await?;
    let stored = match state.images.put(kind, &image).await {
        Ok(stored) => stored,
        Err(err) => {
            let _ = tx.rollback().await;
            return Err(err.into());
        }
    };

    let input = CreateStaffMember {
        image: stored.clone(),
        name: form.name,
        role: form.role,
        phone: form.phone,
    };

    let created = match StaffMemberRepo::create(&mut *tx, kind, &input).await {
        Ok(member) => tx.commit().await.map(|()| member),
        Err(err) => {
            let _ = tx.rollback().await;
            Err(err)
        }
    };

    match created {
        Ok(member) => {
            tracing::info!(%kind, id = member.id, role = %member.role, "Roster record created");
            let resource = StaffMemberResource::new(kind, &state.config.app_url, member);
            Ok(Json(ApiResource::ok(kind.messages().created, resource)))
        }
        Err(err) => {
            release_image(&state, kind, &stored).await;
            unconfirmed(kind, err, kind.messages().create_failed)
        }
    }
}

/// GET /api/admin/{roster}/{id}
///
/// A missing record is reported in the envelope, not with a 404.
pub async fn show(
    State(state): State<AppState>,
    Extension(kind): Extension<RosterKind>,
    Path(id): Path<DbId>,
) -> AppResult<RecordResponse> {
    let messages = kind.messages();
    let response = match StaffMemberRepo::find_by_id(&state.pool, kind, id).await? {
        Some(member) => ApiResource::ok(
            messages.detail,
            StaffMemberResource::new(kind, &state.config.app_url, member),
        ),
        None => ApiResource::failed(messages.detail_missing),
    };
    Ok(Json(response))
}

/// PUT|PATCH|POST /api/admin/{roster}/{id}
///
/// Text fields are always replaced. A new photo replaces the old one, which
/// is removed from storage once nothing references it.
pub async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<RosterKind>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<RecordResponse> {
    let messages = kind.messages();
    let StaffUpload { form, image } = StaffUpload::from_multipart(multipart).await?;

    let Some(existing) = StaffMemberRepo::find_by_id(&state.pool, kind, id).await? else {
        return Ok(Json(ApiResource::failed(messages.update_failed)));
    };

    let image = validate_submission(&state, kind, &form, image, Some(id), false).await?;

    let mut tx = state.pool.begin().await?;
    let new_image = match &image {
        Some(image) => {
            StaffMemberRepo::lock_image(&mut tx, kind, &image.stored_name()).await?;
            match state.images.put(kind, image).await {
                Ok(stored) => Some(stored),
                Err(err) => {
                    let _ = tx.rollback().await;
                    return Err(err.into());
                }
            }
        }
        None => None,
    };
    // A re-upload of the current photo hashes to the same name.
    let replaced = new_image
        .as_deref()
        .filter(|name| *name != existing.image)
        .map(str::to_string);

    let input = UpdateStaffMember {
        image: new_image,
        name: form.name,
        role: form.role,
        phone: form.phone,
    };

    let updated = match StaffMemberRepo::update(&mut *tx, kind, id, &input).await {
        Ok(Some(member)) => tx.commit().await.map(|()| Some(member)),
        Ok(None) => {
            let _ = tx.rollback().await;
            Ok(None)
        }
        Err(err) => {
            let _ = tx.rollback().await;
            Err(err)
        }
    };

    let updated = match updated {
        Ok(updated) => updated,
        Err(err) => {
            if let Some(name) = &replaced {
                release_image(&state, kind, name).await;
            }
            return unconfirmed(kind, err, messages.update_failed);
        }
    };

    let Some(member) = updated else {
        // Deleted between the lookup and the update.
        if let Some(name) = &replaced {
            release_image(&state, kind, name).await;
        }
        return Ok(Json(ApiResource::failed(messages.update_failed)));
    };

    if replaced.is_some() {
        release_image(&state, kind, &existing.image).await;
    }

    tracing::info!(
        %kind,
        id,
        role = %member.role,
        image_replaced = replaced.is_some(),
        "Roster record updated"
    );
    let resource = StaffMemberResource::new(kind, &state.config.app_url, member);
    Ok(Json(ApiResource::ok(messages.updated, resource)))
}

/// DELETE /api/admin/{roster}/{id}
///
/// Removes the row, then its photo if no other record uses it.
pub async fn delete(
    State(state): State<AppState>,
    Extension(kind): Extension<RosterKind>,
    Path(id): Path<DbId>,
) -> AppResult<RecordResponse> {
    let messages = kind.messages();

    let Some(existing) = StaffMemberRepo::find_by_id(&state.pool, kind, id).await? else {
        return Ok(Json(ApiResource::failed(messages.delete_failed)));
    };

    match StaffMemberRepo::delete(&state.pool, kind, id).await {
        Ok(true) => {}
        Ok(false) => return Ok(Json(ApiResource::failed(messages.delete_failed))),
        Err(err) => return unconfirmed(kind, err, messages.delete_failed),
    }

    release_image(&state, kind, &existing.image).await;

    tracing::info!(%kind, id, "Roster record deleted");
    Ok(Json(ApiResource::done(messages.deleted)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate a submission and return the accepted photo, if one was sent.
///
/// Collects every field problem before failing. The role ownership lookup
/// only runs for valid single-holder roles; `exclude_id` is the record being
/// edited.
async fn validate_submission(
    state: &AppState,
    kind: RosterKind,
    form: &StaffForm,
    image: Option<Vec<u8>>,
    exclude_id: Option<DbId>,
    image_required: bool,
) -> AppResult<Option<AcceptedImage>> {
    let mut errors = FieldErrors::new();

    let accepted = match image {
        None => {
            if image_required {
                errors.push(FIELD_IMAGE, required_message(FIELD_IMAGE));
            }
            None
        }
        Some(bytes) => match check_image(&bytes) {
            Ok(image_kind) => Some(AcceptedImage {
                kind: image_kind,
                bytes,
            }),
            Err(problems) => {
                for problem in problems {
                    errors.push(FIELD_IMAGE, upload_problem_message(problem));
                }
                None
            }
        },
    };

    errors.merge(form.check());

    if form.role_needs_uniqueness_check() {
        let holder =
            StaffMemberRepo::find_role_holder(&state.pool, kind, &form.role, exclude_id).await?;
        if let Some(holder) = holder {
            tracing::debug!(%kind, role = %form.role, holder_id = holder.id, "Role already held");
            errors.push(FIELD_ROLE, ROLE_TAKEN_MESSAGE);
        }
    }

    errors.into_result().map_err(AppError::Validation)?;
    Ok(accepted)
}

/// Map a failed write to its response.
///
/// A lost race on a single-holder role is a validation error like the
/// pre-check; any other database failure is reported as an unconfirmed
/// mutation in the envelope.
fn unconfirmed(
    kind: RosterKind,
    err: sqlx::Error,
    message: &'static str,
) -> AppResult<RecordResponse> {
    if is_role_conflict(&err) {
        return Err(AppError::Database(err));
    }
    tracing::error!(%kind, error = %err, "Roster write failed");
    Ok(Json(ApiResource::failed(message)))
}

/// Remove a stored photo once no record of `kind` references it.
///
/// Failures are logged and swallowed; the row change is already committed.
async fn release_image(state: &AppState, kind: RosterKind, name: &str) {
    match remove_if_unreferenced(state, kind, name).await {
        Ok(true) => tracing::debug!(%kind, file = %name, "Photo removed"),
        Ok(false) => tracing::debug!(%kind, file = %name, "Photo kept"),
        Err(e) => tracing::warn!(%kind, file = %name, error = %e, "Failed to release photo"),
    }
}

/// Count references and remove the file under the photo lock, so a
/// concurrent create or update cannot claim it in between.
async fn remove_if_unreferenced(state: &AppState, kind: RosterKind, name: &str) -> AppResult<bool> {
    let mut tx = state.pool.begin().await?;
    StaffMemberRepo::lock_image(&mut tx, kind, name).await?;
    let refs = StaffMemberRepo::count_image_references(&mut *tx, kind, name).await?;

    let removed = if refs == 0 {
        state.images.remove(kind, name).await
    } else {
        Ok(false)
    };
    tx.commit().await?;
    Ok(removed?)
}
