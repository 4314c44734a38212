/// Request and response shapes for the photos API
use crate::db::photo::Photo;
use crate::error::{FieldError, PhotoError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

/// Body of `POST /photos`
#[derive(Debug, Deserialize, Validate)]
pub struct PhotoCreate {
    #[validate(required(message = "field required"), length(min = 1, message = "name cannot be empty"))]
    pub name: Option<String>,
    #[validate(required(message = "field required"))]
    pub url: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

/// Validated create payload handed to the repository
#[derive(Debug, Clone, PartialEq)]
pub struct NewPhoto {
    pub name: String,
    pub url: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl TryFrom<PhotoCreate> for NewPhoto {
    type Error = PhotoError;

    fn try_from(payload: PhotoCreate) -> Result<Self, Self::Error> {
        payload.validate().map_err(field_errors)?;

        let PhotoCreate {
            name: Some(name),
            url: Some(url),
            width,
            height,
        } = payload
        else {
            return Err(PhotoError::Internal(
                "create payload passed validation without name or url".to_string(),
            ));
        };

        Ok(NewPhoto {
            name,
            url,
            width,
            height,
        })
    }
}

/// Body of `PATCH /photos/{id}`
///
/// The outer `Option` is `None` when the field was left out of the body;
/// `Some(None)` means the caller sent an explicit `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub width: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub height: Option<Option<i64>>,
}

impl Validate for PhotoUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match &self.name {
            Some(None) => errors.add("name", error("null", "name cannot be null")),
            Some(Some(name)) if name.is_empty() => {
                errors.add("name", error("length", "name cannot be empty"))
            }
            _ => {}
        }
        if let Some(None) = &self.url {
            errors.add("url", error("null", "url cannot be null"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl PhotoUpdate {
    /// Copy every field present in the payload onto `photo`
    pub fn apply_to(self, photo: &mut Photo) {
        if let Some(Some(name)) = self.name {
            photo.name = name;
        }
        if let Some(Some(url)) = self.url {
            photo.url = url;
        }
        if let Some(width) = self.width {
            photo.width = width;
        }
        if let Some(height) = self.height {
            photo.height = height;
        }
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Flatten `validator` output into the 422 body entries
pub fn field_errors(errors: ValidationErrors) -> PhotoError {
    let mut details: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter()
                .map(|e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    FieldError::body(Some(field.as_str()), msg, e.code.to_string())
                })
                .collect::<Vec<_>>()
        })
        .collect();
    details.sort_by(|a, b| a.loc.cmp(&b.loc));

    PhotoError::Validation(details)
}

/// Photo as returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoResponse {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Photo> for PhotoResponse {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            name: photo.name,
            url: photo.url,
            width: photo.width,
            height: photo.height,
            created_at: photo.created_at,
            updated_at: photo.updated_at,
        }
    }
}
