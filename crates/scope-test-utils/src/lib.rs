//! Testing utilities for the scope workspace
//!
//! Shared fixtures and in-memory collaborators.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use scope_catalog::{
    PhaseProduct, ProductCategory, ProductTemplate, ProjectTemplate, TemplateId, TemplatePhase,
};
use scope_core::{
    ApiError, Attachment, AttachmentId, AttachmentPatch, DirtyGuard, EditingSession, FeedState,
    FeedType, NewAttachment, PermissionContext, Project, ProjectApi, ProjectId, ProjectModel,
    RenderObserver, ScopeConfig, SessionDeps, SessionView, StoreState, Topic,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Call recorded by [`InMemoryProjectApi`]
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    UpdateProject(ProjectId, ProjectModel),
    AddAttachment(ProjectId, NewAttachment),
    UpdateAttachment(ProjectId, AttachmentId, AttachmentPatch),
    RemoveAttachment(ProjectId, AttachmentId),
}

/// Project API backed by a map of projects
///
/// Attachment ids are assigned as `att-<n>`. A queued failure is returned by
/// the next call instead of touching the projects.
#[derive(Debug, Default)]
pub struct InMemoryProjectApi {
    projects: Mutex<HashMap<ProjectId, Project>>,
    calls: Mutex<Vec<ApiCall>>,
    next_failure: Mutex<Option<ApiError>>,
    next_attachment: AtomicUsize,
}

impl InMemoryProjectApi {
    pub fn with_project(project: Project) -> Self {
        let api = Self::default();
        api.projects.lock().insert(project.id, project);
        api
    }

    pub fn project(&self, id: ProjectId) -> Option<Project> {
        self.projects.lock().get(&id).cloned()
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    pub fn fail_next(&self, error: ApiError) {
        *self.next_failure.lock() = Some(error);
    }

    fn record(&self, call: ApiCall) -> Result<(), ApiError> {
        self.calls.lock().push(call);
        match self.next_failure.lock().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn with_project_mut<T>(
        &self,
        id: ProjectId,
        f: impl FnOnce(&mut Project) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut projects = self.projects.lock();
        let project = projects.get_mut(&id).ok_or_else(|| ApiError::NotFound {
            resource: "project".to_string(),
            id: id.to_string(),
        })?;
        f(project)
    }
}

#[async_trait]
impl ProjectApi for InMemoryProjectApi {
    async fn update_project(
        &self,
        project_id: ProjectId,
        model: ProjectModel,
    ) -> Result<Project, ApiError> {
        self.record(ApiCall::UpdateProject(project_id, model.clone()))?;
        self.with_project_mut(project_id, |project| {
            for (key, value) in model.0 {
                if key == "name" {
                    if let Some(name) = value.as_str() {
                        project.name = name.to_string();
                    }
                } else {
                    project.fields.insert(key, value);
                }
            }
            Ok(project.clone())
        })
    }

    async fn add_project_attachment(
        &self,
        project_id: ProjectId,
        attachment: NewAttachment,
    ) -> Result<Attachment, ApiError> {
        self.record(ApiCall::AddAttachment(project_id, attachment.clone()))?;
        let n = self.next_attachment.fetch_add(1, Ordering::SeqCst) + 1;
        self.with_project_mut(project_id, |project| {
            let created = attachment.into_attachment(AttachmentId(format!("att-{n}")));
            project.attachments.push(created.clone());
            Ok(created)
        })
    }

    async fn update_project_attachment(
        &self,
        project_id: ProjectId,
        attachment_id: AttachmentId,
        patch: AttachmentPatch,
    ) -> Result<Attachment, ApiError> {
        self.record(ApiCall::UpdateAttachment(
            project_id,
            attachment_id.clone(),
            patch.clone(),
        ))?;
        self.with_project_mut(project_id, |project| {
            let attachment = project
                .attachments
                .iter_mut()
                .find(|a| a.id == attachment_id)
                .ok_or_else(|| ApiError::attachment_not_found(attachment_id.as_str()))?;
            patch.apply_to(attachment);
            Ok(attachment.clone())
        })
    }

    async fn remove_project_attachment(
        &self,
        project_id: ProjectId,
        attachment_id: AttachmentId,
    ) -> Result<(), ApiError> {
        self.record(ApiCall::RemoveAttachment(project_id, attachment_id.clone()))?;
        self.with_project_mut(project_id, |project| {
            let before = project.attachments.len();
            project.attachments.retain(|a| a.id != attachment_id);
            if project.attachments.len() == before {
                Err(ApiError::attachment_not_found(attachment_id.as_str()))
            } else {
                Ok(())
            }
        })
    }
}

/// Dirty guard counting the signals it receives
#[derive(Debug, Default)]
pub struct RecordingDirtyGuard {
    pub dirty: AtomicUsize,
    pub undo: AtomicUsize,
}

impl RecordingDirtyGuard {
    pub fn dirty_count(&self) -> usize {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn undo_count(&self) -> usize {
        self.undo.load(Ordering::SeqCst)
    }
}

impl DirtyGuard for RecordingDirtyGuard {
    fn project_dirty(&self) {
        self.dirty.fetch_add(1, Ordering::SeqCst);
    }

    fn project_dirty_undo(&self) {
        self.undo.fetch_add(1, Ordering::SeqCst);
    }
}

/// Observer keeping every rendered view
#[derive(Debug, Default)]
pub struct RecordingObserver {
    views: Mutex<Vec<SessionView>>,
}

impl RecordingObserver {
    pub fn count(&self) -> usize {
        self.views.lock().len()
    }

    pub fn last(&self) -> Option<SessionView> {
        self.views.lock().last().cloned()
    }
}

impl RenderObserver for RecordingObserver {
    fn render(&self, view: &SessionView) {
        self.views.lock().push(view.clone());
    }
}

/// Session wired to in-memory collaborators
pub struct TestSession {
    pub session: EditingSession,
    pub api: Arc<InMemoryProjectApi>,
    pub guard: Arc<RecordingDirtyGuard>,
    pub observer: Arc<RecordingObserver>,
}

pub fn setup_session(project: Project, config: ScopeConfig) -> TestSession {
    let api = Arc::new(InMemoryProjectApi::with_project(project));
    let guard = Arc::new(RecordingDirtyGuard::default());
    let observer = Arc::new(RecordingObserver::default());
    let deps = SessionDeps {
        api: api.clone(),
        dirty_guard: guard.clone(),
        observer: observer.clone(),
    };
    TestSession {
        session: EditingSession::new(config, deps),
        api,
        guard,
        observer,
    }
}

pub fn sample_project() -> Project {
    let mut project = Project::new(1001, "Customer portal");
    project.template_id = Some(TemplateId(50));
    project.attachments.push(
        NewAttachment::new("Brief", "PROJECT_ATTACHMENTS/1001/brief.pdf")
            .into_attachment(AttachmentId::new("att-0")),
    );
    project
        .fields
        .insert("details".to_string(), serde_json::json!({"utm": {"code": ""}}));
    project
}

pub fn member() -> PermissionContext {
    PermissionContext::member("manager")
}

pub fn sample_product_templates() -> Vec<ProductTemplate> {
    vec![
        ProductTemplate::new(1, "Wireframes")
            .with_key("wireframes")
            .with_category("design")
            .with_icon("product-design-wireframes"),
        ProductTemplate::new(2, "Front-end")
            .with_product_key("website_development")
            .with_category("dev")
            .with_icon("../../assets/icons/product-dev-front-end-dev.svg"),
        ProductTemplate::new(3, "Secret sauce")
            .with_key("secret")
            .with_category("dev")
            .hidden(),
        ProductTemplate::new(4, "Retired")
            .with_key("retired")
            .with_category("qa")
            .disabled(),
    ]
}

pub fn sample_categories() -> Vec<ProductCategory> {
    vec![
        ProductCategory::new("design", "Design"),
        ProductCategory::new("dev", "Development"),
    ]
}

pub fn sample_project_templates() -> Vec<ProjectTemplate> {
    let mut template = ProjectTemplate {
        id: TemplateId(50),
        key: "app".to_string(),
        name: "App".to_string(),
        ..ProjectTemplate::default()
    };
    template.phases.insert(
        "design".to_string(),
        TemplatePhase {
            name: "Design".to_string(),
            products: vec![PhaseProduct {
                id: None,
                product_key: Some("wireframes".to_string()),
            }],
        },
    );
    vec![template]
}

pub fn sample_store() -> StoreState {
    let mut store = StoreState::default();
    store.project_state.project = sample_project();
    store.load_user.user.id = "40051".to_string();
    store.templates.product_templates = Some(sample_product_templates());
    store.templates.project_templates = Some(sample_project_templates());
    store.templates.product_categories = Some(sample_categories());
    store.project_topics.feeds.insert(
        FeedType::Primary,
        FeedState {
            topics: vec![Topic::new(1, "PRIMARY", "Kickoff")],
        },
    );
    store.project_topics.feeds.insert(
        FeedType::Messages,
        FeedState {
            topics: vec![Topic::new(2, "MESSAGES", "Pricing")],
        },
    );
    store
}
