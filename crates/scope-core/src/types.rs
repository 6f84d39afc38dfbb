//! Core types for Scope Core
//!
//! Defines:
//! - Project and attachment records as the session sees them
//! - The edited form model sent on save
//! - Phases and discussion topics shown next to the form

use scope_catalog::TemplateId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Project identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attachment identifier, assigned by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentId(pub String);

impl AttachmentId {
    /// Create new attachment id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as str
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AttachmentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// File attached to a project
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attachment {
    /// Identity
    pub id: AttachmentId,
    /// Display title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Storage path of the uploaded file
    pub file_path: String,
    /// MIME type
    pub content_type: Option<String>,
    /// Size in bytes
    pub size: Option<u64>,
    /// Free-form tags
    pub tags: Vec<String>,
}

/// Attachment payload before the server assigns an id
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewAttachment {
    /// Display title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Storage path of the uploaded file
    pub file_path: String,
    /// MIME type
    pub content_type: Option<String>,
    /// Size in bytes
    pub size: Option<u64>,
    /// Free-form tags
    pub tags: Vec<String>,
}

impl NewAttachment {
    /// Create new attachment payload
    #[inline]
    #[must_use]
    pub fn new(title: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    /// Materialize with a server-assigned id
    #[must_use]
    pub fn into_attachment(self, id: AttachmentId) -> Attachment {
        Attachment {
            id,
            title: self.title,
            description: self.description,
            file_path: self.file_path,
            content_type: self.content_type,
            size: self.size,
            tags: self.tags,
        }
    }
}

/// Field replacements for an existing attachment
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttachmentPatch {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New tags
    pub tags: Option<Vec<String>>,
}

impl AttachmentPatch {
    /// Apply the present fields to `attachment`
    pub fn apply_to(&self, attachment: &mut Attachment) {
        if let Some(title) = &self.title {
            attachment.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            attachment.description = Some(description.clone());
        }
        if let Some(tags) = &self.tags {
            attachment.tags.clone_from(tags);
        }
    }
}

/// Project as loaded from the store
///
/// Only the fields this crate reasons about are typed; everything else the
/// edit form works with is kept in `fields`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Identity
    pub id: ProjectId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Project template the project was created from
    #[serde(default)]
    pub template_id: Option<TemplateId>,
    /// Attached files
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Remaining editable fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Project {
    /// Create new project
    #[inline]
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: ProjectId(id),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Look up an attachment
    #[must_use]
    pub fn attachment(&self, id: &AttachmentId) -> Option<&Attachment> {
        self.attachments.iter().find(|a| &a.id == id)
    }
}

/// Full edited form model, sent as-is on save
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectModel(pub Map<String, Value>);

impl ProjectModel {
    /// Create empty model
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With field
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Field value
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Project phase shown in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPhase {
    /// Identity
    pub id: u64,
    /// Display name
    pub name: String,
    /// Lifecycle status
    pub status: String,
}

/// Discussion topic in a project feed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Topic {
    /// Identity
    pub id: u64,
    /// Feed tag, e.g. `PRIMARY` or `MESSAGES`
    pub tag: String,
    /// Title
    pub title: String,
}

impl Topic {
    /// Create new topic
    #[inline]
    #[must_use]
    pub fn new(id: u64, tag: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            tag: tag.into(),
            title: title.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_keeps_unknown_fields() {
        let json = r#"{
            "id": 42,
            "name": "Mobile app",
            "templateId": 3,
            "attachments": [{"id": "a1", "title": "Brief", "filePath": "x/brief.pdf"}],
            "details": {"appDefinition": {"goal": "ship"}}
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, ProjectId(42));
        assert_eq!(project.template_id, Some(TemplateId(3)));
        assert_eq!(project.attachments.len(), 1);
        assert!(project.fields.contains_key("details"));
        assert!(project.attachment(&AttachmentId::new("a1")).is_some());
    }

    #[test]
    fn patch_applies_present_fields_only() {
        let mut attachment = NewAttachment::new("Brief", "p/1/brief.pdf")
            .into_attachment(AttachmentId::new("a1"));
        attachment.tags = vec!["contract".to_string()];

        AttachmentPatch {
            title: Some("Final brief".to_string()),
            ..AttachmentPatch::default()
        }
        .apply_to(&mut attachment);

        assert_eq!(attachment.title, "Final brief");
        assert_eq!(attachment.tags, vec!["contract".to_string()]);
        assert_eq!(attachment.file_path, "p/1/brief.pdf");
    }

    #[test]
    fn model_builder() {
        let model = ProjectModel::new().with("name", "Renamed");
        assert_eq!(model.get("name"), Some(&Value::from("Renamed")));
    }
}
