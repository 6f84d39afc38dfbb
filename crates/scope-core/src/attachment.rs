//! Attachment orchestration
//!
//! Forwards add/update/remove requests for one project's attachments to the
//! [`ProjectApi`]. The orchestrator holds no attachment state of its own:
//! lookups such as "does this id exist" happen server-side, and whatever the
//! server answers is surfaced unchanged.

use crate::api::ProjectApi;
use crate::error::SessionError;
use crate::permission::PermissionContext;
use crate::types::{Attachment, AttachmentId, AttachmentPatch, NewAttachment, ProjectId};
use std::sync::Arc;

/// Storage folder for a project's uploads: `<root>/<project_id>/`
#[must_use]
pub fn attachments_storage_path(root: &str, project_id: ProjectId) -> String {
    format!("{}/{}/", root.trim_end_matches('/'), project_id)
}

/// Attachment mutations for a single project
#[derive(Clone)]
pub struct AttachmentOrchestrator {
    api: Arc<dyn ProjectApi>,
    project_id: ProjectId,
    storage_path: String,
    /// `None` when the permission guard is disabled
    guard: Option<PermissionContext>,
}

impl std::fmt::Debug for AttachmentOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachmentOrchestrator")
            .field("project_id", &self.project_id)
            .field("storage_path", &self.storage_path)
            .field("guarded", &self.guard.is_some())
            .finish_non_exhaustive()
    }
}

impl AttachmentOrchestrator {
    /// Create orchestrator for `project_id`
    #[must_use]
    pub fn new(api: Arc<dyn ProjectApi>, project_id: ProjectId, attachments_root: &str) -> Self {
        Self {
            api,
            project_id,
            storage_path: attachments_storage_path(attachments_root, project_id),
            guard: None,
        }
    }

    /// Reject mutations unless `permissions` allow managing attachments
    #[inline]
    #[must_use]
    pub fn with_guard(mut self, permissions: PermissionContext) -> Self {
        self.guard = Some(permissions);
        self
    }

    /// Target project
    #[inline]
    #[must_use]
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Folder the upload surface writes into
    #[inline]
    #[must_use]
    pub fn storage_path(&self) -> &str {
        &self.storage_path
    }

    /// Append an attachment
    ///
    /// # Errors
    /// - `SessionError::PermissionDenied` if guarded and the viewer has no role
    /// - `SessionError::Api` with the collaborator's failure
    #[tracing::instrument(skip(self, attachment), fields(project_id = %self.project_id))]
    pub async fn add(&self, attachment: NewAttachment) -> Result<Attachment, SessionError> {
        self.ensure_allowed("add attachment")?;
        let created = self
            .api
            .add_project_attachment(self.project_id, attachment)
            .await
            .map_err(|e| {
                tracing::warn!("add attachment failed: {}", e);
                e
            })?;
        tracing::info!(attachment_id = %created.id, "attachment added");
        Ok(created)
    }

    /// Patch the attachment identified by `attachment_id`
    ///
    /// # Errors
    /// - `SessionError::PermissionDenied` if guarded and the viewer has no role
    /// - `SessionError::Api` with `ApiError::NotFound` when the id is unknown
    #[tracing::instrument(skip(self, patch), fields(project_id = %self.project_id))]
    pub async fn update(
        &self,
        attachment_id: AttachmentId,
        patch: AttachmentPatch,
    ) -> Result<Attachment, SessionError> {
        self.ensure_allowed("update attachment")?;
        let updated = self
            .api
            .update_project_attachment(self.project_id, attachment_id, patch)
            .await
            .map_err(|e| {
                tracing::warn!("update attachment failed: {}", e);
                e
            })?;
        tracing::info!(attachment_id = %updated.id, "attachment updated");
        Ok(updated)
    }

    /// Delete the attachment identified by `attachment_id`
    ///
    /// Repeated removals are forwarded; the server's answer is returned.
    ///
    /// # Errors
    /// - `SessionError::PermissionDenied` if guarded and the viewer has no role
    /// - `SessionError::Api` with the collaborator's failure
    #[tracing::instrument(skip(self), fields(project_id = %self.project_id))]
    pub async fn remove(&self, attachment_id: AttachmentId) -> Result<(), SessionError> {
        self.ensure_allowed("remove attachment")?;
        self.api
            .remove_project_attachment(self.project_id, attachment_id)
            .await
            .map_err(|e| {
                tracing::warn!("remove attachment failed: {}", e);
                e
            })?;
        tracing::info!("attachment removed");
        Ok(())
    }

    fn ensure_allowed(&self, action: &'static str) -> Result<(), SessionError> {
        match &self.guard {
            Some(permissions) if !permissions.can_manage_attachments() => {
                tracing::warn!(action, "attachment action rejected, no member role");
                Err(SessionError::PermissionDenied { action })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_path_shape() {
        assert_eq!(
            attachments_storage_path("PROJECT_ATTACHMENTS", ProjectId(7)),
            "PROJECT_ATTACHMENTS/7/"
        );
        assert_eq!(attachments_storage_path("uploads/", ProjectId(12)), "uploads/12/");
    }
}
