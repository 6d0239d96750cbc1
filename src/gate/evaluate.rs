//! Gate decision pipeline. Each dimension (roles, permissions) is checked on
//! its own, then the two results are combined:
//!
//! - neither constrained: open gate, access granted
//! - one constrained: that dimension decides
//! - both constrained: both must be satisfied, whatever `require_all` says
//!
//! Nothing here is cached; callers re-evaluate on every render.

use std::fmt;

use tracing::trace;

use super::request::AccessRequest;
use crate::identity::PermissionSource;

/// Result of checking one dimension of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionCheck {
    /// The request lists nothing for this dimension.
    Unconstrained,
    Satisfied,
    Unsatisfied,
}

impl DimensionCheck {
    fn from_bool(ok: bool) -> Self {
        if ok { DimensionCheck::Satisfied } else { DimensionCheck::Unsatisfied }
    }

    pub fn is_constrained(self) -> bool {
        self != DimensionCheck::Unconstrained
    }
}

impl fmt::Display for DimensionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DimensionCheck::Unconstrained => "unconstrained",
            DimensionCheck::Satisfied => "satisfied",
            DimensionCheck::Unsatisfied => "unsatisfied",
        })
    }
}

pub fn check_roles<S: PermissionSource + ?Sized>(request: &AccessRequest, source: &S) -> DimensionCheck {
    let roles = &request.allowed_roles;
    if roles.is_empty() {
        return DimensionCheck::Unconstrained;
    }
    DimensionCheck::from_bool(if request.require_all {
        source.has_all_roles(roles)
    } else {
        source.has_any_role(roles)
    })
}

pub fn check_permissions<S: PermissionSource + ?Sized>(request: &AccessRequest, source: &S) -> DimensionCheck {
    let perms = &request.allowed_permissions;
    if perms.is_empty() {
        return DimensionCheck::Unconstrained;
    }
    DimensionCheck::from_bool(if request.require_all {
        perms.iter().all(|p| source.has_permission(p))
    } else {
        source.has_any_permission(perms)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    pub has_access: bool,
    pub roles: DimensionCheck,
    pub permissions: DimensionCheck,
}

impl AccessDecision {
    fn combine(roles: DimensionCheck, permissions: DimensionCheck) -> Self {
        use DimensionCheck::*;
        let has_access = match (roles, permissions) {
            (Unconstrained, Unconstrained) => true,
            (Unconstrained, only) | (only, Unconstrained) => only == Satisfied,
            (r, p) => r == Satisfied && p == Satisfied,
        };
        Self { has_access, roles, permissions }
    }
}

/// What the rendering shell should do with a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    Granted,
    DeniedShowFallback,
    DeniedShowError,
}

impl AccessOutcome {
    pub fn is_granted(self) -> bool {
        self == AccessOutcome::Granted
    }
}

pub fn evaluate<S: PermissionSource + ?Sized>(request: &AccessRequest, source: &S) -> AccessDecision {
    let decision = AccessDecision::combine(check_roles(request, source), check_permissions(request, source));
    trace!(
        target: "backoffice::gate",
        roles = %decision.roles,
        permissions = %decision.permissions,
        require_all = request.require_all,
        has_access = decision.has_access,
        "access evaluated"
    );
    decision
}

pub fn decide<S: PermissionSource + ?Sized>(request: &AccessRequest, show_error: bool, source: &S) -> AccessOutcome {
    if evaluate(request, source).has_access {
        AccessOutcome::Granted
    } else if show_error {
        AccessOutcome::DeniedShowError
    } else {
        AccessOutcome::DeniedShowFallback
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(",")
}

/// One-line trace of how a request was decided, for logs and the CLI.
pub fn explain<S: PermissionSource + ?Sized>(request: &AccessRequest, source: &S) -> String {
    let d = evaluate(request, source);
    let mode = if request.require_all { "all" } else { "any" };
    format!(
        "explain: mode={} roles=[{}]:{} permissions=[{}]:{} -> {}",
        mode,
        join(&request.allowed_roles),
        d.roles,
        join(&request.allowed_permissions),
        d.permissions,
        if d.has_access { "granted" } else { "denied" }
    )
}
