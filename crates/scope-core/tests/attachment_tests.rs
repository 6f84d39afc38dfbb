use pretty_assertions::assert_eq;
use scope_core::{
    ApiError, AttachmentId, AttachmentOrchestrator, AttachmentPatch, NewAttachment,
    PermissionContext, ProjectId, ScopeConfig, SessionError, SessionProps,
};
use scope_test_utils::{member, sample_project, setup_session, InMemoryProjectApi};
use std::sync::Arc;

fn orchestrator() -> (Arc<InMemoryProjectApi>, AttachmentOrchestrator) {
    let project = sample_project();
    let api = Arc::new(InMemoryProjectApi::with_project(project.clone()));
    let orchestrator = AttachmentOrchestrator::new(api.clone(), project.id, "PROJECT_ATTACHMENTS");
    (api, orchestrator)
}

#[tokio::test]
async fn test_add_assigns_id() {
    let (api, attachments) = orchestrator();

    let created = attachments
        .add(NewAttachment::new("Mockups", "PROJECT_ATTACHMENTS/1001/mockups.zip"))
        .await
        .unwrap();

    assert_eq!(created.id, AttachmentId::new("att-1"));
    let stored = api.project(ProjectId(1001)).unwrap();
    assert_eq!(stored.attachments.len(), 2);
    assert!(stored.attachment(&created.id).is_some());
}

#[tokio::test]
async fn test_update_patches_existing_attachment() {
    let (_api, attachments) = orchestrator();
    let patch = AttachmentPatch {
        title: Some("Signed brief".to_string()),
        tags: Some(vec!["legal".to_string()]),
        ..AttachmentPatch::default()
    };

    let updated = attachments.update("att-0".into(), patch).await.unwrap();
    assert_eq!(updated.title, "Signed brief");
    assert_eq!(updated.tags, vec!["legal".to_string()]);
    assert_eq!(updated.file_path, "PROJECT_ATTACHMENTS/1001/brief.pdf");
}

#[tokio::test]
async fn test_update_unknown_id_surfaces_not_found() {
    let mut t = setup_session(sample_project(), ScopeConfig::new());
    t.session
        .receive_props(SessionProps::new(sample_project()).with_permissions(member()))
        .unwrap();
    let before = t.session.snapshot().cloned();

    let err = t
        .session
        .update_project_attachment("missing-id".into(), AttachmentPatch::default())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(
        err.api_error(),
        Some(&ApiError::attachment_not_found("missing-id"))
    );
    assert_eq!(t.session.snapshot().cloned(), before);
}

#[tokio::test]
async fn test_repeated_remove_is_forwarded() {
    let (api, attachments) = orchestrator();

    attachments.remove("att-0".into()).await.unwrap();
    let err = attachments.remove("att-0".into()).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn test_api_failure_is_surfaced_unchanged() {
    let (api, attachments) = orchestrator();
    api.fail_next(ApiError::Network("connection reset".to_string()));

    let err = attachments
        .add(NewAttachment::new("Logo", "PROJECT_ATTACHMENTS/1001/logo.svg"))
        .await
        .unwrap_err();

    assert_eq!(
        err.api_error(),
        Some(&ApiError::Network("connection reset".to_string()))
    );
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_guard_rejects_viewer_without_role() {
    let (api, attachments) = orchestrator();
    let guarded = attachments.with_guard(PermissionContext::super_user());

    let err = guarded.remove("att-0".into()).await.unwrap_err();
    assert!(matches!(err, SessionError::PermissionDenied { .. }));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_session_guard_can_be_disabled() {
    let config = ScopeConfig::new().with_attachment_guard(false);
    let mut t = setup_session(sample_project(), config);
    t.session
        .receive_props(SessionProps::new(sample_project()))
        .unwrap();

    t.session
        .remove_project_attachment("att-0".into())
        .await
        .unwrap();
    assert!(t.api.project(ProjectId(1001)).unwrap().attachments.is_empty());
}

#[tokio::test]
async fn test_storage_path_follows_current_project() {
    let config = ScopeConfig::new().with_attachments_root("uploads/");
    let mut t = setup_session(sample_project(), config);
    t.session
        .receive_props(SessionProps::new(sample_project()).with_permissions(member()))
        .unwrap();
    assert_eq!(t.session.attachments().unwrap().storage_path(), "uploads/1001/");

    let mut other = sample_project();
    other.id = ProjectId(2002);
    t.session
        .receive_props(SessionProps::new(other).with_permissions(member()))
        .unwrap();
    let attachments = t.session.attachments().unwrap();
    assert_eq!(attachments.project_id(), ProjectId(2002));
    assert_eq!(attachments.storage_path(), "uploads/2002/");
}

#[tokio::test]
async fn test_concurrent_operations_are_independent() {
    let (api, attachments) = orchestrator();

    let (added, removed, missing) = futures::join!(
        attachments.add(NewAttachment::new("Sitemap", "PROJECT_ATTACHMENTS/1001/sitemap.pdf")),
        attachments.remove("att-0".into()),
        attachments.update("ghost".into(), AttachmentPatch::default()),
    );

    assert!(added.is_ok());
    assert!(removed.is_ok());
    assert!(missing.unwrap_err().is_not_found());
    assert_eq!(api.calls().len(), 3);
    assert_eq!(api.project(ProjectId(1001)).unwrap().attachments.len(), 1);
}

#[test]
fn test_attachments_before_mount() {
    let t = setup_session(sample_project(), ScopeConfig::new());
    assert!(matches!(
        t.session.attachments(),
        Err(SessionError::NotInitialized)
    ));
}
