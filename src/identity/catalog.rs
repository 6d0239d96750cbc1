//! Role to default-permission mapping for the back-office dashboard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::permission::{Permission, PermissionSet};
use super::role::Role;

const MEMBER_PERMS: &[&str] = &["invoices.view", "parties.view"];
const ADMIN_PERMS: &[&str] = &[
    "invoices.create",
    "invoices.edit",
    "parties.create",
    "parties.edit",
    "companies.view",
];
const SUPER_ADMIN_PERMS: &[&str] = &[
    "invoices.delete",
    "parties.delete",
    "companies.create",
    "companies.edit",
    "companies.delete",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCatalog {
    roles: BTreeMap<Role, PermissionSet>,
}

fn perms(names: &[&[&str]]) -> PermissionSet {
    names.iter().flat_map(|group| group.iter()).map(|n| Permission::new(*n)).collect()
}

impl RoleCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Each tier includes everything granted to the tier below it.
    pub fn dashboard_default() -> Self {
        let mut roles = BTreeMap::new();
        roles.insert(Role::Member, perms(&[MEMBER_PERMS]));
        roles.insert(Role::Admin, perms(&[MEMBER_PERMS, ADMIN_PERMS]));
        roles.insert(Role::SuperAdmin, perms(&[MEMBER_PERMS, ADMIN_PERMS, SUPER_ADMIN_PERMS]));
        Self { roles }
    }

    /// Replace the permissions of one role.
    pub fn set_role(&mut self, role: Role, permissions: PermissionSet) {
        self.roles.insert(role, permissions);
    }

    pub fn permissions_for(&self, role: Role) -> PermissionSet {
        self.roles.get(&role).cloned().unwrap_or_default()
    }

    pub fn permissions_for_roles(&self, roles: impl IntoIterator<Item = Role>) -> PermissionSet {
        let mut out = PermissionSet::new();
        for role in roles {
            if let Some(set) = self.roles.get(&role) {
                out.extend(set.iter().cloned());
            }
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Role, &PermissionSet)> {
        self.roles.iter()
    }
}
