//! Scope Core - project specification editing session
//!
//! The session layer between a project store and the edit page:
//! - Derives session props from store slices with an injected permission check
//! - Runs the editing session lifecycle with value-based render suppression
//! - Gates saving and attachment management by role
//! - Orchestrates attachment add/update/remove against the project API
//!
//! # Example
//!
//! ```rust,ignore
//! use scope_core::{EditingSession, ScopeConfig, SessionDeps, SessionProps, select_props};
//!
//! # async fn example(deps: SessionDeps, store: scope_core::StoreState,
//! #     permissions: scope_core::StaticPermissions) -> Result<(), scope_core::SessionError> {
//! let mut session = EditingSession::new(ScopeConfig::new(), deps);
//!
//! let derived = select_props(&store, &permissions);
//! let props = SessionProps::new(store.project_state.project.clone()).with_derived(derived);
//! session.receive_props(props)?;
//!
//! let model = scope_core::ProjectModel::new().with("name", "Renamed");
//! let saved = session.save_project(model).await?;
//! println!("saved project {}", saved.id);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod api;
pub mod attachment;
pub mod config;
pub mod error;
pub mod logging;
pub mod permission;
pub mod selector;
pub mod session;
pub mod state_machine;
pub mod types;
pub mod view;

pub use api::{DirtyGuard, NoopDirtyGuard, ProjectApi, RenderObserver};
pub use attachment::{attachments_storage_path, AttachmentOrchestrator};
pub use config::{LoggingConfig, ScopeConfig, DEFAULT_ATTACHMENTS_ROOT};
pub use error::{ApiError, ConfigError, SessionError};
pub use logging::init_tracing;
pub use permission::{
    PermissionChecker, PermissionContext, PermissionGate, PermissionKey, StaticPermissions,
};
pub use selector::{
    select_props, DerivedProps, FeedState, FeedType, LoadUserState, PhaseTopics,
    ProjectState, ProjectTopicsState, StoreState, TemplatesState, User,
};
pub use session::{should_render, EditingSession, RenderInputs, SessionDeps, SessionProps};
pub use state_machine::{allowed_transitions, validate_transition, SessionState};
pub use types::{
    Attachment, AttachmentId, AttachmentPatch, NewAttachment, Project, ProjectId, ProjectModel,
    ProjectPhase, Topic,
};
pub use view::{
    EditSurface, EstimationView, FormView, InfoPanelView, NotificationCriterion, SessionView,
    SPECIFICATION_MODIFIED_EVENT,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Scope Core
    pub use crate::{
        EditingSession, PermissionContext, ProjectApi, ProjectModel, ScopeConfig, SessionDeps,
        SessionError, SessionProps, SessionState,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
