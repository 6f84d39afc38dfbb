//! Render output of an editing session
//!
//! A [`SessionView`] is plain data: the sidebar, the editable surface and the
//! notification criteria the page subscribes to. Views compare by value, which
//! is what render suppression relies on.

use crate::selector::PhaseTopics;
use crate::types::{Project, ProjectId, ProjectPhase, Topic};
use scope_catalog::{CategoryBucket, ProductCategory, ProductTemplate, ProjectTemplate};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Event type raised when a project's specification changes server-side
pub const SPECIFICATION_MODIFIED_EVENT: &str =
    "connect.notification.project.specificationModified";

/// Theme the estimation panel is drawn with inside the session
pub const ESTIMATION_THEME: &str = "dashboard";

/// Notification subscription criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCriterion {
    /// Event type to match
    pub event_type: String,
    /// Required event contents
    pub contents: CriterionContents,
}

/// Contents filter of a criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionContents {
    /// Project the event must concern
    pub project_id: ProjectId,
}

impl NotificationCriterion {
    /// Specification changes of `project_id`
    #[must_use]
    pub fn specification_modified(project_id: ProjectId) -> Self {
        Self {
            event_type: SPECIFICATION_MODIFIED_EVENT.to_string(),
            contents: CriterionContents { project_id },
        }
    }
}

/// Project info sidebar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoPanelView {
    pub current_member_role: Option<String>,
    pub is_super_user: bool,
    pub phases: Vec<ProjectPhase>,
    pub feeds: Vec<Topic>,
    pub is_feeds_loading: bool,
    pub products_timelines: BTreeMap<u64, Value>,
    pub phases_topics: BTreeMap<u64, PhaseTopics>,
    pub is_project_processing: bool,
}

/// Edit form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    /// Working snapshot being edited
    pub project: Project,
    /// Last saved state, for the form's own dirty tracking
    pub project_non_dirty: Option<Project>,
    pub template: Option<ProjectTemplate>,
    pub is_editable: bool,
    /// Mirrors the processing flag; the form is replaced by the loading
    /// placeholder while processing, so a built form always reads `false`
    pub saving: bool,
    pub can_manage_attachments: bool,
    pub attachments_storage_path: String,
    pub product_templates: Vec<ProductTemplate>,
    pub product_categories: Vec<ProductCategory>,
    /// Phase picker sections built from `product_templates`
    pub picker_sections: Vec<CategoryBucket>,
    pub show_hidden: bool,
}

/// Editable surface: a placeholder while the store is processing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EditSurface {
    /// Loading placeholder
    Loading,
    /// The edit form
    Form(Box<FormView>),
}

impl EditSurface {
    /// The form, unless loading
    #[inline]
    #[must_use]
    pub fn form(&self) -> Option<&FormView> {
        match self {
            EditSurface::Form(form) => Some(form),
            EditSurface::Loading => None,
        }
    }

    /// Whether the placeholder is shown
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, EditSurface::Loading)
    }
}

/// Estimation panel under the form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimationView {
    pub question: Value,
    pub theme: &'static str,
}

/// Everything one render pass draws
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub project_id: ProjectId,
    pub sidebar: InfoPanelView,
    pub surface: EditSurface,
    pub estimation: Option<EstimationView>,
    pub notifications: Vec<NotificationCriterion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criterion_serializes_like_subscription_payload() {
        let criterion = NotificationCriterion::specification_modified(ProjectId(5));
        let json = serde_json::to_value(&criterion).unwrap();
        assert_eq!(json["eventType"], SPECIFICATION_MODIFIED_EVENT);
        assert_eq!(json["contents"]["projectId"], 5);
    }
}
