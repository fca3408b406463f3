//! Editable drafts for create and update.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, InvalidInputError, ValidationError};
use crate::types::Category;

use super::MediaRecord;

/// A single failed field in a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire name of the field (`title`, `type`, `year_time`, ...).
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// User-edited, not-yet-persisted record fields.
///
/// Every field is optional so the same type serves both create (where the
/// required fields must all be present) and partial update (where only
/// changed fields are sent). Serializes with the gateway's snake_case
/// field names; the poster is sent separately as a file part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(rename = "year_time", skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip)]
    pub poster: Option<PosterUpload>,
}

impl MediaDraft {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill a draft from an existing record, as an edit form does.
    pub fn from_record(record: &MediaRecord) -> Self {
        Self {
            title: Some(record.title.clone()),
            category: Some(record.category),
            director: Some(record.director.clone()),
            budget: Some(record.budget.clone()),
            location: Some(record.location.clone()),
            duration: Some(record.duration.clone()),
            period: Some(record.period.clone()),
            description: record.description.clone(),
            poster: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = Some(budget.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_poster(mut self, poster: PosterUpload) -> Self {
        self.poster = Some(poster);
        self
    }

    /// Returns true if the draft carries nothing to send.
    pub fn is_empty(&self) -> bool {
        self.form_fields().is_empty() && self.poster.is_none()
    }

    /// Keep only the fields that differ from `original`.
    ///
    /// An attached poster is always kept.
    pub fn changed_since(&self, original: &MediaRecord) -> MediaDraft {
        fn changed(new: &Option<String>, old: &str) -> Option<String> {
            new.as_ref().filter(|v| v.as_str() != old).cloned()
        }

        MediaDraft {
            title: changed(&self.title, &original.title),
            category: self.category.filter(|c| *c != original.category),
            director: changed(&self.director, &original.director),
            budget: changed(&self.budget, &original.budget),
            location: changed(&self.location, &original.location),
            duration: changed(&self.duration, &original.duration),
            period: changed(&self.period, &original.period),
            description: changed(
                &self.description,
                original.description.as_deref().unwrap_or_default(),
            ),
            poster: self.poster.clone(),
        }
    }

    /// Check that every required field is present and non-blank.
    ///
    /// # Errors
    ///
    /// Returns every missing field at once, in form order.
    pub fn validate_for_create(&self) -> Result<(), ValidationError> {
        let fields: Vec<FieldError> = self
            .required_fields()
            .into_iter()
            .filter(|(_, _, value)| value.is_none_or(|v| v.trim().is_empty()))
            .map(|(field, label, _)| FieldError::new(field, format!("{} is required", label)))
            .collect();

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { fields })
        }
    }

    /// Check a partial update: present required fields must be non-blank,
    /// and the draft must change something.
    ///
    /// # Errors
    ///
    /// Returns the blank fields, or a single `draft` error for an empty update.
    pub fn validate_for_update(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError {
                fields: vec![FieldError::new("draft", "Nothing to update")],
            });
        }

        let fields: Vec<FieldError> = self
            .required_fields()
            .into_iter()
            .filter(|(_, _, value)| value.is_some_and(|v| v.trim().is_empty()))
            .map(|(field, label, _)| {
                FieldError::new(field, format!("{} cannot be empty", label))
            })
            .collect();

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { fields })
        }
    }

    /// The present text fields as `(wire name, value)` pairs, in form order.
    ///
    /// This is the multipart encoding; the poster is not included.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields: Vec<(&'static str, String)> = self
            .required_fields()
            .into_iter()
            .filter_map(|(field, _, value)| value.map(|v| (field, v.to_string())))
            .collect();

        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }

        fields
    }

    fn required_fields(&self) -> [(&'static str, &'static str, Option<&str>); 7] {
        [
            ("title", "Title", self.title.as_deref()),
            ("type", "Type", self.category.as_ref().map(Category::as_str)),
            ("director", "Director", self.director.as_deref()),
            ("budget", "Budget", self.budget.as_deref()),
            ("location", "Location", self.location.as_deref()),
            ("duration", "Duration", self.duration.as_deref()),
            ("year_time", "Year/Time", self.period.as_deref()),
        ]
    }
}

/// A poster image attached to a draft.
#[derive(Clone, PartialEq, Eq)]
pub struct PosterUpload {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl PosterUpload {
    /// Create an upload from raw bytes.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read an image file from disk, inferring its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is not a supported image type or
    /// the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let mime_type = Self::mime_for(path).ok_or_else(|| InvalidInputError::Poster {
            path: display.clone(),
            reason: "unsupported image type (expected jpg, png, gif or webp)".to_string(),
        })?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| InvalidInputError::Poster {
                path: display.clone(),
                reason: "path has no file name".to_string(),
            })?
            .to_string();

        let bytes = std::fs::read(path).map_err(|e| InvalidInputError::Poster {
            path: display,
            reason: e.to_string(),
        })?;

        Ok(Self::new(file_name, mime_type, bytes))
    }

    /// MIME type for a supported image extension.
    pub fn mime_for(path: &Path) -> Option<&'static str> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "gif" => Some("image/gif"),
            "webp" => Some("image/webp"),
            _ => None,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

// Image bytes are noise in logs.
impl fmt::Debug for PosterUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PosterUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
