//! Permission gating
//!
//! Two kinds of checks live here:
//! - [`PermissionGate`]: pure role predicates deciding whether the viewer may
//!   edit the project or manage its attachments
//! - [`PermissionChecker`]: the injected, session-scoped capability check used
//!   by the view-model selector (e.g. access to private posts)

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Viewer's role and superuser flag
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PermissionContext {
    /// Role of the viewer in the project, if a member
    pub current_member_role: Option<String>,
    /// Platform superuser
    pub is_super_user: bool,
}

impl PermissionContext {
    /// Context for a project member
    #[inline]
    #[must_use]
    pub fn member(role: impl Into<String>) -> Self {
        Self {
            current_member_role: Some(role.into()),
            is_super_user: false,
        }
    }

    /// Context for a superuser without a member role
    #[inline]
    #[must_use]
    pub fn super_user() -> Self {
        Self {
            current_member_role: None,
            is_super_user: true,
        }
    }

    /// See [`PermissionGate::can_edit`]
    #[inline]
    #[must_use]
    pub fn can_edit(&self) -> bool {
        PermissionGate::can_edit(self.current_member_role.as_deref(), self.is_super_user)
    }

    /// See [`PermissionGate::can_manage_attachments`]
    #[inline]
    #[must_use]
    pub fn can_manage_attachments(&self) -> bool {
        PermissionGate::can_manage_attachments(self.current_member_role.as_deref())
    }
}

/// Role predicates for mutating actions
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionGate;

impl PermissionGate {
    /// Superusers and any project member may edit
    #[inline]
    #[must_use]
    pub fn can_edit(role: Option<&str>, is_super_user: bool) -> bool {
        is_super_user || has_role(role)
    }

    /// Only project members manage attachments
    #[inline]
    #[must_use]
    pub fn can_manage_attachments(role: Option<&str>) -> bool {
        has_role(role)
    }
}

fn has_role(role: Option<&str>) -> bool {
    role.is_some_and(|r| !r.is_empty())
}

/// Named session-scoped permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionKey {
    /// Read and write private message topics
    AccessPrivatePost,
}

impl PermissionKey {
    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionKey::AccessPrivatePost => "ACCESS_PRIVATE_POST",
        }
    }
}

/// Synchronous permission lookup, injected into the selector
pub trait PermissionChecker: Send + Sync {
    /// Whether the current viewer holds `key`
    fn check(&self, key: PermissionKey) -> bool;
}

/// Fixed set of granted permissions
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    granted: HashSet<PermissionKey>,
}

impl StaticPermissions {
    /// Grant nothing
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Grant the listed permissions
    #[must_use]
    pub fn granting(keys: impl IntoIterator<Item = PermissionKey>) -> Self {
        Self {
            granted: keys.into_iter().collect(),
        }
    }
}

impl PermissionChecker for StaticPermissions {
    fn check(&self, key: PermissionKey) -> bool {
        self.granted.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn edit_requires_role_or_superuser() {
        assert!(PermissionGate::can_edit(Some("manager"), false));
        assert!(PermissionGate::can_edit(None, true));
        assert!(PermissionGate::can_edit(Some(""), true));
        assert!(!PermissionGate::can_edit(None, false));
        assert!(!PermissionGate::can_edit(Some(""), false));
    }

    #[test]
    fn superuser_alone_cannot_manage_attachments() {
        assert!(!PermissionContext::super_user().can_manage_attachments());
        assert!(PermissionContext::super_user().can_edit());
        assert!(PermissionContext::member("customer").can_manage_attachments());
    }

    #[test]
    fn static_permissions() {
        let none = StaticPermissions::none();
        assert!(!none.check(PermissionKey::AccessPrivatePost));

        let granted = StaticPermissions::granting([PermissionKey::AccessPrivatePost]);
        assert!(granted.check(PermissionKey::AccessPrivatePost));
    }

    proptest! {
        #[test]
        fn prop_gate_matches_definition(role in proptest::option::of(".{0,12}"), su in any::<bool>()) {
            let non_empty = role.as_deref().is_some_and(|r| !r.is_empty());
            prop_assert_eq!(PermissionGate::can_edit(role.as_deref(), su), su || non_empty);
            prop_assert_eq!(PermissionGate::can_manage_attachments(role.as_deref()), non_empty);
        }
    }
}
