use super::permission::Permission;
use super::principal::Principal;
use super::role::Role;
use super::source::PermissionSource;

/// Explicit actor context handed to the access gate for one render.
///
/// `principal` is `None` until the external permission fetch has resolved;
/// an unloaded context answers false to every check.
#[derive(Debug, Clone)]
pub struct ActorContext {
    pub principal: Option<Principal>,
    pub request_id: String,
}

impl Default for ActorContext {
    fn default() -> Self {
        Self::anonymous()
    }
}

fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl ActorContext {
    pub fn anonymous() -> Self {
        Self { principal: None, request_id: new_request_id() }
    }

    pub fn for_principal(principal: Principal) -> Self {
        Self { principal: Some(principal), request_id: new_request_id() }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.principal.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.principal.as_ref().map(|p| p.user_id.as_str())
    }
}

impl PermissionSource for ActorContext {
    fn has_any_role(&self, roles: &[Role]) -> bool {
        self.principal.as_ref().is_some_and(|p| p.has_any_role(roles))
    }

    fn has_all_roles(&self, roles: &[Role]) -> bool {
        self.principal.as_ref().is_some_and(|p| p.has_all_roles(roles))
    }

    fn has_permission(&self, permission: &Permission) -> bool {
        self.principal.as_ref().is_some_and(|p| p.has_permission(permission))
    }

    fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        self.principal.as_ref().is_some_and(|p| p.has_any_permission(permissions))
    }
}
