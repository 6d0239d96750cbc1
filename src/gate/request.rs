use serde::{Deserialize, Serialize};

use crate::identity::{Permission, Role};

/// What is required to view a protected region.
///
/// An empty role list and an empty permission list together describe an open
/// gate. `require_all` switches each non-empty list from any-of to all-of.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessRequest {
    pub allowed_roles: Vec<Role>,
    pub allowed_permissions: Vec<Permission>,
    pub require_all: bool,
}

impl AccessRequest {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn any_role(roles: impl IntoIterator<Item = Role>) -> Self {
        Self::open().with_roles(roles)
    }

    pub fn all_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self::any_role(roles).require_all(true)
    }

    pub fn any_permission<I, P>(permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        Self::open().with_permissions(permissions)
    }

    pub fn all_permissions<I, P>(permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        Self::any_permission(permissions).require_all(true)
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.allowed_roles.extend(roles);
        self
    }

    pub fn with_permissions<I, P>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.allowed_permissions.extend(permissions.into_iter().map(Into::into));
        self
    }

    pub fn require_all(mut self, require_all: bool) -> Self {
        self.require_all = require_all;
        self
    }

    pub fn is_open(&self) -> bool {
        self.allowed_roles.is_empty() && self.allowed_permissions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_is_open() {
        let r = AccessRequest::default();
        assert!(r.is_open());
        assert!(!r.require_all);
        assert!(!AccessRequest::any_role([Role::Admin]).is_open());
    }

    #[test]
    fn json_uses_camel_case_and_defaults() {
        let r: AccessRequest = serde_json::from_str(
            r#"{"allowedPermissions":["invoices.edit","invoices.view"],"requireAll":true}"#,
        )
        .unwrap();
        assert_eq!(r, AccessRequest::all_permissions(["invoices.edit", "invoices.view"]));

        let empty: AccessRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.is_open());
    }
}
