//! Multipart form extraction for the admin create/update endpoints.

use axum::extract::Multipart;
use roster_core::validation::{StaffForm, FIELD_IMAGE, FIELD_NAME, FIELD_PHONE, FIELD_ROLE};

use crate::error::{AppError, AppResult};

/// Raw submission: trimmed text fields plus the photo bytes, if any.
#[derive(Debug, Default)]
pub struct StaffUpload {
    pub form: StaffForm,
    /// `None` when no file was sent or the file part was empty.
    pub image: Option<Vec<u8>>,
}

impl StaffUpload {
    /// Drain a multipart body. Unknown parts (including `_method`) are
    /// ignored; a repeated part keeps its last value.
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut upload = StaffUpload::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                FIELD_IMAGE => {
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    upload.image = (!data.is_empty()).then(|| data.to_vec());
                }
                FIELD_NAME | FIELD_ROLE | FIELD_PHONE => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    let text = text.trim().to_string();
                    match name.as_str() {
                        FIELD_NAME => upload.form.name = text,
                        FIELD_ROLE => upload.form.role = text,
                        _ => upload.form.phone = text,
                    }
                }
                _ => {} // ignore unknown fields
            }
        }

        Ok(upload)
    }
}
