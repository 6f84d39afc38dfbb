//! Derived view model
//!
//! Pure selector combining raw store slices into the props the editing
//! session consumes. The permission check is injected so the selector has no
//! ambient state; it is evaluated once per pass.

use crate::error::ApiError;
use crate::permission::{PermissionChecker, PermissionKey};
use crate::types::{Project, ProjectPhase, Topic};
use scope_catalog::{project_product_templates, ProductCategory, ProductTemplate, ProjectTemplate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Project feed kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedType {
    /// Public project discussion
    Primary,
    /// Private messages
    Messages,
}

/// Topics of one feed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedState {
    pub topics: Vec<Topic>,
}

/// `projectTopics` slice
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectTopicsState {
    pub feeds: HashMap<FeedType, FeedState>,
    pub is_loading: bool,
}

impl ProjectTopicsState {
    /// Topics of `feed`, empty when the feed is not loaded
    #[must_use]
    pub fn topics(&self, feed: FeedType) -> &[Topic] {
        self.feeds
            .get(&feed)
            .map(|f| f.topics.as_slice())
            .unwrap_or_default()
    }
}

/// Topics attached to one phase
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhaseTopics {
    pub topics: Vec<Topic>,
    pub is_loading: bool,
}

/// `projectState` slice
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectState {
    pub project: Project,
    pub processing: bool,
    pub error: Option<ApiError>,
    pub phases: Vec<ProjectPhase>,
}

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Identifier as delivered by the auth payload
    pub id: String,
}

/// `loadUser` slice
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadUserState {
    pub user: User,
}

/// `templates` slice; each catalog is absent until loaded
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplatesState {
    pub project_templates: Option<Vec<ProjectTemplate>>,
    pub product_templates: Option<Vec<ProductTemplate>>,
    pub product_categories: Option<Vec<ProductCategory>>,
}

/// Store shape read by the selector
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreState {
    pub project_state: ProjectState,
    pub load_user: LoadUserState,
    pub templates: TemplatesState,
    pub project_topics: ProjectTopicsState,
    pub phases_topics: BTreeMap<u64, PhaseTopics>,
}

/// Props derived from the store
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DerivedProps {
    pub processing: bool,
    pub error: Option<ApiError>,
    /// Leading decimal digits of the user id; `None` when there are none
    pub current_user_id: Option<u64>,
    /// Product templates applicable to the project's template
    pub product_templates: Vec<ProductTemplate>,
    pub product_categories: Vec<ProductCategory>,
    pub all_product_templates: Vec<ProductTemplate>,
    pub phases: Vec<ProjectPhase>,
    pub is_feeds_loading: bool,
    pub is_processing: bool,
    pub phases_topics: BTreeMap<u64, PhaseTopics>,
    /// Primary topics, followed by message topics when permitted
    pub feeds: Vec<Topic>,
}

/// Derive session props from the store
#[must_use]
pub fn select_props(state: &StoreState, permissions: &dyn PermissionChecker) -> DerivedProps {
    let templates = &state.templates;
    let project_state = &state.project_state;

    let mut feeds = state.project_topics.topics(FeedType::Primary).to_vec();
    if permissions.check(PermissionKey::AccessPrivatePost) {
        feeds.extend_from_slice(state.project_topics.topics(FeedType::Messages));
    }

    let product_templates = match (&templates.product_templates, &templates.project_templates) {
        (Some(products), Some(projects)) => {
            project_product_templates(products, projects, project_state.project.template_id)
        }
        _ => Vec::new(),
    };

    tracing::debug!(
        project_id = %project_state.project.id,
        feeds = feeds.len(),
        applicable_templates = product_templates.len(),
        "derived session props"
    );

    DerivedProps {
        processing: project_state.processing,
        error: project_state.error.clone(),
        current_user_id: parse_user_id(&state.load_user.user.id),
        product_templates,
        product_categories: templates.product_categories.clone().unwrap_or_default(),
        all_product_templates: templates.product_templates.clone().unwrap_or_default(),
        phases: project_state.phases.clone(),
        is_feeds_loading: state.project_topics.is_loading,
        is_processing: project_state.processing,
        phases_topics: state.phases_topics.clone(),
        feeds,
    }
}

/// Read the leading decimal digits of `raw`, ignoring surrounding whitespace
/// and any trailing garbage (`"40051abc"` is user 40051).
fn parse_user_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
