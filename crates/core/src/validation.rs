//! Roster form validation and the field-keyed error map.
//!
//! The map serializes as `{ "<field>": ["<message>", ...] }` with fields in
//! form order, which is the 422 body clients already parse.

use indexmap::IndexMap;
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::roles;
use crate::upload::UploadProblem;

pub const FIELD_IMAGE: &str = "image";
pub const FIELD_NAME: &str = "name";
pub const FIELD_ROLE: &str = "role";
pub const FIELD_PHONE: &str = "phone";

/// Field order of the multipart form, used to order error output.
pub const FORM_FIELDS: [&str; 4] = [FIELD_IMAGE, FIELD_NAME, FIELD_ROLE, FIELD_PHONE];

pub const ROLE_INVALID_MESSAGE: &str = "The selected role is invalid.";
pub const ROLE_TAKEN_MESSAGE: &str = "role tersebut sudah ada";
pub const IMAGE_TYPE_MESSAGE: &str = "The image must be a file of type: jpeg, jpg, png.";
pub const IMAGE_SIZE_MESSAGE: &str = "The image must not be greater than 2000 kilobytes.";

pub fn required_message(field: &str) -> String {
    format!("The {field} field is required.")
}

pub fn upload_problem_message(problem: UploadProblem) -> &'static str {
    match problem {
        UploadProblem::UnsupportedType => IMAGE_TYPE_MESSAGE,
        UploadProblem::TooLarge => IMAGE_SIZE_MESSAGE,
    }
}

/// Ordered map of field name to validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding a single message for a single field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Copy messages out of a `validator` result, in [`FORM_FIELDS`] order.
    pub fn extend_from_validator(&mut self, errors: &ValidationErrors) {
        let by_field = errors.field_errors();
        for field in FORM_FIELDS {
            let Some(list) = by_field.get(field) else {
                continue;
            };
            for err in list.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| format!("The {field} field is invalid."));
                self.push(field, message);
            }
        }
    }

    /// Reorder entries so they follow [`FORM_FIELDS`]; unknown fields go last.
    pub fn in_form_order(mut self) -> Self {
        fn rank(field: &str) -> usize {
            FORM_FIELDS
                .iter()
                .position(|f| *f == field)
                .unwrap_or(FORM_FIELDS.len())
        }
        self.0.sort_by(|a, _, b, _| rank(a).cmp(&rank(b)));
        self
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.in_form_order())
        }
    }
}

/// Text fields of a roster form, already trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct StaffForm {
    #[validate(length(min = 1, message = "The name field is required."))]
    pub name: String,
    #[validate(
        length(min = 1, message = "The role field is required."),
        custom(function = "validate_role_label")
    )]
    pub role: String,
    #[validate(length(min = 1, message = "The phone field is required."))]
    pub phone: String,
}

impl StaffForm {
    /// Run the stateless checks (presence and role membership).
    ///
    /// Role ownership needs the database and is checked by the caller.
    pub fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Err(e) = self.validate() {
            errors.extend_from_validator(&e);
        }
        errors
    }

    /// Whether the role still needs an ownership lookup: it is a valid,
    /// single-holder role.
    pub fn role_needs_uniqueness_check(&self) -> bool {
        roles::is_valid(&self.role) && !roles::allows_multiple_holders(&self.role)
    }
}

/// Blank roles are left to the `length` rule so only one message is reported.
fn validate_role_label(role: &str) -> Result<(), ValidationError> {
    if role.is_empty() || roles::is_valid(role) {
        Ok(())
    } else {
        Err(ValidationError::new("in").with_message(ROLE_INVALID_MESSAGE.into()))
    }
}
