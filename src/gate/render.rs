use super::evaluate::{decide, AccessOutcome};
use super::request::AccessRequest;
use crate::config::EffectiveConfig;
use crate::identity::{Permission, PermissionSource, Role};

/// Inline notice shown in place of protected content when `show_error` is set.
pub const DENIED_NOTICE: &str = "You do not have permission to access this content.";

/// What a gate produced for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<C, F> {
    Children(C),
    Fallback(F),
    DeniedNotice(String),
    Empty,
}

impl<C, F> Rendered<C, F> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Rendered::Empty)
    }

    pub fn children(self) -> Option<C> {
        match self {
            Rendered::Children(c) => Some(c),
            _ => None,
        }
    }
}

/// Wraps protected content behind an [`AccessRequest`].
#[derive(Debug, Clone)]
pub struct AccessGate<F> {
    pub request: AccessRequest,
    pub fallback: Option<F>,
    pub show_error: bool,
    notice: String,
}

impl<F: Clone> AccessGate<F> {
    pub fn new(request: AccessRequest) -> Self {
        Self { request, fallback: None, show_error: false, notice: DENIED_NOTICE.to_string() }
    }

    pub fn for_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self::new(AccessRequest::any_role(roles))
    }

    pub fn for_permissions<I, P>(permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        Self::new(AccessRequest::any_permission(permissions))
    }

    pub fn require_all(mut self, require_all: bool) -> Self {
        self.request.require_all = require_all;
        self
    }

    pub fn with_fallback(mut self, fallback: F) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn show_error(mut self, show_error: bool) -> Self {
        self.show_error = show_error;
        self
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = notice.into();
        self
    }

    /// Apply configured presentation settings (currently the denial notice).
    pub fn configured(self, cfg: &EffectiveConfig) -> Self {
        self.with_notice(cfg.denied_notice.clone())
    }

    pub fn notice(&self) -> &str {
        &self.notice
    }

    pub fn outcome<S: PermissionSource + ?Sized>(&self, source: &S) -> AccessOutcome {
        decide(&self.request, self.show_error, source)
    }

    /// Evaluate against `source` and pick what to show. `children` is only
    /// built when access is granted.
    pub fn render<S, C>(&self, source: &S, children: impl FnOnce() -> C) -> Rendered<C, F>
    where
        S: PermissionSource + ?Sized,
    {
        match self.outcome(source) {
            AccessOutcome::Granted => Rendered::Children(children()),
            AccessOutcome::DeniedShowError => Rendered::DeniedNotice(self.notice.clone()),
            AccessOutcome::DeniedShowFallback => match &self.fallback {
                Some(f) => Rendered::Fallback(f.clone()),
                None => Rendered::Empty,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Principal;

    fn member() -> Principal {
        Principal::new("m1").with_role(Role::Member).with_permission("invoices.view")
    }

    #[test]
    fn granted_renders_children() {
        let gate: AccessGate<&str> = AccessGate::for_roles([Role::Member]).with_fallback("nope");
        assert_eq!(gate.render(&member(), || "table"), Rendered::Children("table"));
    }

    #[test]
    fn denied_prefers_notice_over_fallback() {
        let gate = AccessGate::for_roles([Role::Admin]).with_fallback("nope").show_error(true);
        let out: Rendered<&str, &str> = gate.render(&member(), || "table");
        assert_eq!(out, Rendered::DeniedNotice(DENIED_NOTICE.to_string()));
    }

    #[test]
    fn denied_without_fallback_is_empty() {
        let gate: AccessGate<&str> = AccessGate::for_permissions(["invoices.edit"]);
        let out = gate.render(&member(), || "table");
        assert!(out.is_empty());
    }

    #[test]
    fn children_not_built_when_denied() {
        let gate: AccessGate<()> = AccessGate::for_roles([Role::SuperAdmin]);
        let mut built = false;
        let _ = gate.render(&member(), || built = true);
        assert!(!built);
    }

    #[test]
    fn custom_notice_is_used() {
        let gate: AccessGate<()> = AccessGate::for_roles([Role::Admin]).show_error(true).with_notice("Admins only");
        let out = gate.render(&member(), || ());
        assert_eq!(out, Rendered::DeniedNotice("Admins only".into()));
    }
}
