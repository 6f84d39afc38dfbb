//! Editing session controller
//!
//! Owns the "project being edited" lifecycle:
//! - Replaces its working snapshot with every inbound project (incoming
//!   updates always win, no merge with local edits)
//! - Renders only when project, snapshot or error changed by value
//! - Dispatches saves and gates them by permission and pending state
//! - Forwards dirty signals from the form to the unsaved-changes guard
//! - Hands out an [`AttachmentOrchestrator`] for the current project

use crate::api::{DirtyGuard, ProjectApi, RenderObserver};
use crate::attachment::AttachmentOrchestrator;
use crate::config::ScopeConfig;
use crate::error::{ApiError, SessionError};
use crate::permission::PermissionContext;
use crate::selector::{DerivedProps, PhaseTopics};
use crate::state_machine::{validate_transition, SessionState};
use crate::types::{
    Attachment, AttachmentId, AttachmentPatch, NewAttachment, Project, ProjectModel, ProjectPhase,
    Topic,
};
use crate::view::{
    EditSurface, EstimationView, FormView, InfoPanelView, NotificationCriterion, SessionView,
    ESTIMATION_THEME,
};
use scope_catalog::{
    find_by_key, ProductCategory, ProductTemplate, ProjectTemplate, TemplateCategorizer,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Inputs supplied by the embedding page on every pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionProps {
    pub project: Project,
    pub project_non_dirty: Option<Project>,
    pub permissions: PermissionContext,
    pub processing: bool,
    pub template: Option<ProjectTemplate>,
    pub all_product_templates: Vec<ProductTemplate>,
    pub product_categories: Vec<ProductCategory>,
    pub estimation_question: Option<Value>,
    pub phases: Vec<ProjectPhase>,
    pub feeds: Vec<Topic>,
    pub products_timelines: BTreeMap<u64, Value>,
    pub is_feeds_loading: bool,
    pub phases_topics: BTreeMap<u64, PhaseTopics>,
    pub is_processing: bool,
    pub error: Option<ApiError>,
}

impl SessionProps {
    /// Props for `project` with everything else empty
    #[inline]
    #[must_use]
    pub fn new(project: Project) -> Self {
        Self {
            project,
            ..Self::default()
        }
    }

    /// Fill the store-derived fields
    #[must_use]
    pub fn with_derived(mut self, derived: DerivedProps) -> Self {
        self.processing = derived.processing;
        self.error = derived.error;
        self.all_product_templates = derived.all_product_templates;
        self.product_categories = derived.product_categories;
        self.phases = derived.phases;
        self.feeds = derived.feeds;
        self.is_feeds_loading = derived.is_feeds_loading;
        self.phases_topics = derived.phases_topics;
        self.is_processing = derived.is_processing;
        self
    }

    /// With viewer permissions
    #[inline]
    #[must_use]
    pub fn with_permissions(mut self, permissions: PermissionContext) -> Self {
        self.permissions = permissions;
        self
    }

    /// With project template
    #[inline]
    #[must_use]
    pub fn with_template(mut self, template: ProjectTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// With surfaced error
    #[inline]
    #[must_use]
    pub fn with_error(mut self, error: ApiError) -> Self {
        self.error = Some(error);
        self
    }

    /// With processing flag
    #[inline]
    #[must_use]
    pub fn with_processing(mut self, processing: bool) -> Self {
        self.processing = processing;
        self.is_processing = processing;
        self
    }
}

/// The values render suppression compares
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderInputs<'a> {
    pub project: &'a Project,
    pub snapshot: &'a Project,
    pub error: Option<&'a ApiError>,
}

/// Whether a pass with `next` inputs must render
///
/// The first pass always renders; later passes render only when any of the
/// compared values differs from `prev`.
#[inline]
#[must_use]
pub fn should_render<'a>(prev: Option<&RenderInputs<'a>>, next: &RenderInputs<'a>) -> bool {
    prev != Some(next)
}

/// Collaborators of a session
#[derive(Clone)]
pub struct SessionDeps {
    pub api: Arc<dyn ProjectApi>,
    pub dirty_guard: Arc<dyn DirtyGuard>,
    pub observer: Arc<dyn RenderObserver>,
}

/// Controller for one mounted editing session
pub struct EditingSession {
    config: ScopeConfig,
    deps: SessionDeps,
    categorizer: TemplateCategorizer,
    state: SessionState,
    props: Option<SessionProps>,
    /// Working copy handed to the form
    snapshot: Option<Project>,
    renders: u64,
}

impl std::fmt::Debug for EditingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditingSession")
            .field("state", &self.state)
            .field("project_id", &self.snapshot.as_ref().map(|p| p.id))
            .field("renders", &self.renders)
            .finish_non_exhaustive()
    }
}

impl EditingSession {
    /// Create an unmounted session
    #[must_use]
    pub fn new(config: ScopeConfig, deps: SessionDeps) -> Self {
        Self {
            config,
            deps,
            categorizer: TemplateCategorizer::default(),
            state: SessionState::Uninitialized,
            props: None,
            snapshot: None,
            renders: 0,
        }
    }

    /// With a custom categorizer for the phase picker
    #[inline]
    #[must_use]
    pub fn with_categorizer(mut self, categorizer: TemplateCategorizer) -> Self {
        self.categorizer = categorizer;
        self
    }

    /// Current lifecycle state
    #[inline]
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Working snapshot
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Option<&Project> {
        self.snapshot.as_ref()
    }

    /// Error surfaced by the last sync
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&ApiError> {
        self.props.as_ref().and_then(|p| p.error.as_ref())
    }

    /// Number of renders issued so far
    #[inline]
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Whether the viewer may edit and save
    #[inline]
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.props.as_ref().is_some_and(|p| p.permissions.can_edit())
    }

    /// Accept a new set of props
    ///
    /// Enters `Syncing`, replaces the working snapshot unconditionally and
    /// settles in `Idle`, or `Error` when the props carry an error. Returns
    /// whether a render was issued.
    ///
    /// A save future dropped before completion leaves the session in
    /// `Saving`; the next props recover it.
    ///
    /// # Errors
    /// Propagates a rejected lifecycle transition
    #[tracing::instrument(skip_all, fields(project_id = %props.project.id))]
    pub fn receive_props(&mut self, props: SessionProps) -> Result<bool, SessionError> {
        self.transition(SessionState::Syncing)?;

        let snapshot = props.project.clone();
        let render = {
            let prev = match (&self.props, &self.snapshot) {
                (Some(p), Some(s)) => Some(RenderInputs {
                    project: &p.project,
                    snapshot: s,
                    error: p.error.as_ref(),
                }),
                _ => None,
            };
            let next = RenderInputs {
                project: &props.project,
                snapshot: &snapshot,
                error: props.error.as_ref(),
            };
            !self.config.suppress_redundant_renders || should_render(prev.as_ref(), &next)
        };

        let settled = if props.error.is_some() {
            SessionState::Error
        } else {
            SessionState::Idle
        };
        self.props = Some(props);
        self.snapshot = Some(snapshot);
        self.transition(settled)?;

        if render {
            let view = self.view()?;
            self.deps.observer.render(&view);
            self.renders += 1;
        } else {
            tracing::debug!("inputs unchanged by value, render suppressed");
        }
        Ok(render)
    }

    /// Build the view for the current props
    ///
    /// # Errors
    /// `SessionError::NotInitialized` before the first props arrive
    pub fn view(&self) -> Result<SessionView, SessionError> {
        let (props, snapshot) = self.current()?;
        let project_id = snapshot.id;

        let surface = if props.processing {
            EditSurface::Loading
        } else {
            EditSurface::Form(Box::new(FormView {
                project: snapshot.clone(),
                project_non_dirty: props.project_non_dirty.clone(),
                template: props.template.clone(),
                is_editable: props.permissions.can_edit(),
                saving: props.processing,
                can_manage_attachments: props.permissions.can_manage_attachments(),
                attachments_storage_path: self.attachments()?.storage_path().to_string(),
                product_templates: props.all_product_templates.clone(),
                product_categories: props.product_categories.clone(),
                picker_sections: self
                    .categorizer
                    .categorize(&props.all_product_templates, Some(&props.product_categories)),
                show_hidden: true,
            }))
        };

        Ok(SessionView {
            project_id,
            sidebar: InfoPanelView {
                current_member_role: props.permissions.current_member_role.clone(),
                is_super_user: props.permissions.is_super_user,
                phases: props.phases.clone(),
                feeds: props.feeds.clone(),
                is_feeds_loading: props.is_feeds_loading,
                products_timelines: props.products_timelines.clone(),
                phases_topics: props.phases_topics.clone(),
                is_project_processing: props.is_processing,
            },
            surface,
            estimation: props.estimation_question.clone().map(|question| EstimationView {
                question,
                theme: ESTIMATION_THEME,
            }),
            notifications: vec![NotificationCriterion::specification_modified(project_id)],
        })
    }

    /// Save the full edited model
    ///
    /// The working snapshot is left alone either way; the store feeds the
    /// saved project (or the error) back through [`Self::receive_props`].
    ///
    /// # Errors
    /// - `SessionError::NotInitialized` before the first props arrive
    /// - `SessionError::PermissionDenied` when the viewer may not edit
    /// - `SessionError::SaveInFlight` while the store is processing
    /// - `SessionError::Api` with the collaborator's failure
    #[tracing::instrument(skip_all)]
    pub async fn save_project(&mut self, model: ProjectModel) -> Result<Project, SessionError> {
        let (props, snapshot) = self.current()?;
        if !props.permissions.can_edit() {
            tracing::warn!(project_id = %snapshot.id, "save rejected, viewer cannot edit");
            return Err(SessionError::PermissionDenied {
                action: "save project",
            });
        }
        if props.processing || self.state == SessionState::Saving {
            return Err(SessionError::SaveInFlight);
        }
        let project_id = snapshot.id;

        self.transition(SessionState::Saving)?;
        tracing::info!(%project_id, fields = model.0.len(), "saving project");
        let result = self.deps.api.update_project(project_id, model).await;
        self.transition(SessionState::Idle)?;

        match result {
            Ok(saved) => {
                tracing::info!(%project_id, "project saved");
                Ok(saved)
            }
            Err(err) => {
                tracing::warn!(%project_id, "save failed: {}", err);
                Err(err.into())
            }
        }
    }

    /// Forward "form has unsaved changes"
    pub fn fire_project_dirty(&self) {
        tracing::debug!("project dirty");
        self.deps.dirty_guard.project_dirty();
    }

    /// Forward "form changes reverted"
    pub fn fire_project_dirty_undo(&self) {
        tracing::debug!("project dirty undo");
        self.deps.dirty_guard.project_dirty_undo();
    }

    /// Attachment mutations for the current project
    ///
    /// Built from the current project id on every call.
    ///
    /// # Errors
    /// `SessionError::NotInitialized` before the first props arrive
    pub fn attachments(&self) -> Result<AttachmentOrchestrator, SessionError> {
        let (props, snapshot) = self.current()?;
        let orchestrator = AttachmentOrchestrator::new(
            Arc::clone(&self.deps.api),
            snapshot.id,
            &self.config.attachments_root,
        );
        Ok(if self.config.enforce_attachment_permissions {
            orchestrator.with_guard(props.permissions.clone())
        } else {
            orchestrator
        })
    }

    /// See [`AttachmentOrchestrator::add`]
    ///
    /// # Errors
    /// As [`AttachmentOrchestrator::add`], or `NotInitialized`
    pub async fn add_project_attachment(
        &self,
        attachment: NewAttachment,
    ) -> Result<Attachment, SessionError> {
        self.attachments()?.add(attachment).await
    }

    /// See [`AttachmentOrchestrator::update`]
    ///
    /// # Errors
    /// As [`AttachmentOrchestrator::update`], or `NotInitialized`
    pub async fn update_project_attachment(
        &self,
        attachment_id: AttachmentId,
        patch: AttachmentPatch,
    ) -> Result<Attachment, SessionError> {
        self.attachments()?.update(attachment_id, patch).await
    }

    /// See [`AttachmentOrchestrator::remove`]
    ///
    /// # Errors
    /// As [`AttachmentOrchestrator::remove`], or `NotInitialized`
    pub async fn remove_project_attachment(
        &self,
        attachment_id: AttachmentId,
    ) -> Result<(), SessionError> {
        self.attachments()?.remove(attachment_id).await
    }

    /// Resolve a picked product template
    ///
    /// Hidden and disabled templates are reachable by key.
    ///
    /// # Errors
    /// - `SessionError::NotInitialized` before the first props arrive
    /// - `SessionError::TemplateNotFound` if no template answers to `key`
    pub fn on_product_template_change(&self, key: &str) -> Result<ProductTemplate, SessionError> {
        let (props, _) = self.current()?;
        let template = find_by_key(&props.all_product_templates, key)
            .cloned()
            .ok_or_else(|| SessionError::TemplateNotFound(key.to_string()))?;
        tracing::info!(template_id = %template.id, key, "product template selected");
        Ok(template)
    }

    /// Notification criteria for the current project, empty before mount
    #[must_use]
    pub fn notification_criteria(&self) -> Vec<NotificationCriterion> {
        self.snapshot
            .as_ref()
            .map(|p| vec![NotificationCriterion::specification_modified(p.id)])
            .unwrap_or_default()
    }

    fn current(&self) -> Result<(&SessionProps, &Project), SessionError> {
        match (&self.props, &self.snapshot) {
            (Some(props), Some(snapshot)) => Ok((props, snapshot)),
            _ => Err(SessionError::NotInitialized),
        }
    }

    fn transition(&mut self, to: SessionState) -> Result<(), SessionError> {
        validate_transition(self.state, to)?;
        tracing::trace!(from = ?self.state, ?to, "session transition");
        self.state = to;
        Ok(())
    }
}
