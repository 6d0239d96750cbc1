use super::permission::Permission;
use super::principal::Principal;
use super::role::Role;

/// Read-only view of the current actor's capabilities.
///
/// Implementations must be synchronous and side-effect free; the access gate
/// calls them on every evaluation.
pub trait PermissionSource {
    /// True when the actor holds at least one of `roles`. False for an empty list.
    fn has_any_role(&self, roles: &[Role]) -> bool;
    /// True when the actor holds every one of `roles`. Vacuously true for an empty list.
    fn has_all_roles(&self, roles: &[Role]) -> bool;
    fn has_permission(&self, permission: &Permission) -> bool;
    /// True when the actor holds at least one of `permissions`. False for an empty list.
    fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(p))
    }
}

impl PermissionSource for Principal {
    fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|r| self.roles.contains(r))
    }

    fn has_all_roles(&self, roles: &[Role]) -> bool {
        roles.iter().all(|r| self.roles.contains(r))
    }

    fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }
}

impl<S: PermissionSource + ?Sized> PermissionSource for &S {
    fn has_any_role(&self, roles: &[Role]) -> bool {
        (**self).has_any_role(roles)
    }

    fn has_all_roles(&self, roles: &[Role]) -> bool {
        (**self).has_all_roles(roles)
    }

    fn has_permission(&self, permission: &Permission) -> bool {
        (**self).has_permission(permission)
    }

    fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        (**self).has_any_permission(permissions)
    }
}
