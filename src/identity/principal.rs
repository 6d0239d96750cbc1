use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::catalog::RoleCatalog;
use super::permission::{Permission, PermissionSet};
use super::role::Role;

/// The signed-in actor: roles and permissions as resolved by the auth backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    #[serde(default)]
    pub roles: BTreeSet<Role>,
    #[serde(default)]
    pub permissions: PermissionSet,
}

impl Principal {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), ..Default::default() }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    pub fn with_permission(mut self, permission: impl Into<Permission>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    pub fn with_permissions<I, P>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.permissions.extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Add the permissions the catalog derives from this principal's roles.
    /// Explicit grants already present are kept.
    pub fn with_catalog_defaults(mut self, catalog: &RoleCatalog) -> Self {
        let derived = catalog.permissions_for_roles(self.roles.iter().copied());
        self.permissions.extend(derived);
        self
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
