//! Collaborator contracts
//!
//! The session depends on these but never implements them: the project API
//! talks to the server, the dirty guard blocks navigation while the form
//! holds unsaved changes, and the render observer draws [`SessionView`]s.

use crate::error::ApiError;
use crate::types::{
    Attachment, AttachmentId, AttachmentPatch, NewAttachment, Project, ProjectId, ProjectModel,
};
use crate::view::SessionView;
use async_trait::async_trait;

/// Server-side project mutations
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// Replace the project's editable fields with `model`
    async fn update_project(
        &self,
        project_id: ProjectId,
        model: ProjectModel,
    ) -> Result<Project, ApiError>;

    /// Append an attachment; the returned record carries the assigned id
    async fn add_project_attachment(
        &self,
        project_id: ProjectId,
        attachment: NewAttachment,
    ) -> Result<Attachment, ApiError>;

    /// Patch an existing attachment
    async fn update_project_attachment(
        &self,
        project_id: ProjectId,
        attachment_id: AttachmentId,
        patch: AttachmentPatch,
    ) -> Result<Attachment, ApiError>;

    /// Delete an attachment
    async fn remove_project_attachment(
        &self,
        project_id: ProjectId,
        attachment_id: AttachmentId,
    ) -> Result<(), ApiError>;
}

/// Unsaved-changes guard fed by the edit form
pub trait DirtyGuard: Send + Sync {
    /// The form now differs from the saved project
    fn project_dirty(&self);

    /// The form is back in sync with the saved project
    fn project_dirty_undo(&self);
}

/// Receives every view the session decides to render
pub trait RenderObserver: Send + Sync {
    /// Draw `view`
    fn render(&self, view: &SessionView);
}

/// Guard that ignores dirty signals
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDirtyGuard;

impl DirtyGuard for NoopDirtyGuard {
    fn project_dirty(&self) {}

    fn project_dirty_undo(&self) {}
}
