//! Access gate integration tests: the documented dashboard scenarios plus
//! property checks over arbitrary actors and requests.

use backoffice::gate::{evaluate, AccessGate, AccessOutcome, AccessRequest, Rendered, DENIED_NOTICE};
use backoffice::identity::{ActorContext, Permission, Principal, RoleCatalog, Role};
use proptest::prelude::*;

fn actor(roles: &[Role], perms: &[&str]) -> ActorContext {
    let mut p = Principal::new("u1").with_permissions(perms.iter().copied());
    for r in roles {
        p = p.with_role(*r);
    }
    ActorContext::for_principal(p)
}

#[test]
fn super_admin_only_region_shows_fallback_to_admin() {
    let gate = AccessGate::for_roles([Role::SuperAdmin]).with_fallback("Read-only view");
    let out = gate.render(&actor(&[Role::Admin], &[]), || "Company settings");
    assert_eq!(out, Rendered::Fallback("Read-only view"));
}

#[test]
fn admin_passes_any_of_admin_or_super_admin() {
    let gate: AccessGate<&str> = AccessGate::for_roles([Role::Admin, Role::SuperAdmin]);
    let out = gate.render(&actor(&[Role::Admin], &[]), || "Edit invoice");
    assert_eq!(out.children(), Some("Edit invoice"));
}

#[test]
fn all_permissions_required_denies_partial_holder() {
    let gate: AccessGate<&str> = AccessGate::for_permissions(["invoices.edit", "invoices.view"]).require_all(true);
    let ctx = actor(&[Role::Member], &["invoices.view"]);
    assert_eq!(gate.outcome(&ctx), AccessOutcome::DeniedShowFallback);
    assert!(gate.render(&ctx, || "Edit invoice").is_empty());
}

#[test]
fn unloaded_actor_is_denied_until_permissions_arrive() {
    let gate: AccessGate<&str> = AccessGate::for_permissions(["invoices.view"]).show_error(true);
    let before = gate.render(&ActorContext::anonymous(), || "Invoices");
    assert_eq!(before, Rendered::DeniedNotice(DENIED_NOTICE.to_string()));

    let after = gate.render(&actor(&[Role::Member], &["invoices.view"]), || "Invoices");
    assert_eq!(after, Rendered::Children("Invoices"));

    // no constraint at all: open even while unloaded
    let open: AccessGate<&str> = AccessGate::new(AccessRequest::open());
    assert_eq!(open.render(&ActorContext::anonymous(), || "Help"), Rendered::Children("Help"));
}

#[test]
fn catalog_defaults_drive_permission_gates() {
    let catalog = RoleCatalog::dashboard_default();
    let admin = ActorContext::for_principal(
        Principal::new("a1").with_role(Role::Admin).with_catalog_defaults(&catalog),
    );
    let delete: AccessGate<&str> = AccessGate::for_permissions(["companies.delete"]);
    let edit: AccessGate<&str> = AccessGate::for_permissions(["invoices.edit"]);
    assert!(delete.render(&admin, || "Delete").is_empty());
    assert_eq!(edit.render(&admin, || "Edit").children(), Some("Edit"));
}

#[test]
fn decision_is_recomputed_each_time() {
    let gate: AccessGate<&str> = AccessGate::for_roles([Role::Admin]);
    let mut ctx = actor(&[Role::Member], &[]);
    assert!(!gate.outcome(&ctx).is_granted());
    ctx.principal = Some(Principal::new("u1").with_role(Role::Admin));
    assert!(gate.outcome(&ctx).is_granted());
}

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::SuperAdmin), Just(Role::Admin), Just(Role::Member)]
}

fn perm_strategy() -> impl Strategy<Value = Permission> {
    prop::sample::select(vec![
        "invoices.view",
        "invoices.edit",
        "parties.view",
        "parties.edit",
        "companies.view",
    ])
    .prop_map(Permission::from)
}

fn principal_strategy() -> impl Strategy<Value = Principal> {
    (
        prop::collection::vec(role_strategy(), 0..3),
        prop::collection::vec(perm_strategy(), 0..4),
    )
        .prop_map(|(roles, perms)| {
            let mut p = Principal::new("prop").with_permissions(perms);
            for r in roles {
                p = p.with_role(r);
            }
            p
        })
}

proptest! {
    #[test]
    fn empty_request_always_grants(p in principal_strategy(), require_all in any::<bool>()) {
        let req = AccessRequest::open().require_all(require_all);
        prop_assert!(evaluate(&req, &p).has_access);
    }

    #[test]
    fn any_role_matches_membership(p in principal_strategy(), roles in prop::collection::vec(role_strategy(), 1..4)) {
        let expected = roles.iter().any(|r| p.roles.contains(r));
        prop_assert_eq!(evaluate(&AccessRequest::any_role(roles), &p).has_access, expected);
    }

    #[test]
    fn all_roles_matches_membership(p in principal_strategy(), roles in prop::collection::vec(role_strategy(), 1..4)) {
        let expected = roles.iter().all(|r| p.roles.contains(r));
        prop_assert_eq!(evaluate(&AccessRequest::all_roles(roles), &p).has_access, expected);
    }

    #[test]
    fn combined_request_is_conjunction(
        p in principal_strategy(),
        roles in prop::collection::vec(role_strategy(), 1..3),
        perms in prop::collection::vec(perm_strategy(), 1..3),
        require_all in any::<bool>(),
    ) {
        let role_only = AccessRequest::any_role(roles.clone()).require_all(require_all);
        let perm_only = AccessRequest::any_permission(perms.clone()).require_all(require_all);
        let both = AccessRequest::any_role(roles).with_permissions(perms).require_all(require_all);
        let expected = evaluate(&role_only, &p).has_access && evaluate(&perm_only, &p).has_access;
        prop_assert_eq!(evaluate(&both, &p).has_access, expected);
    }

    #[test]
    fn denied_with_error_ignores_fallback(p in principal_strategy(), roles in prop::collection::vec(role_strategy(), 1..3)) {
        let gate = AccessGate::for_roles(roles).require_all(true).with_fallback("fallback").show_error(true);
        let out = gate.render(&p, || "children");
        if evaluate(&gate.request, &p).has_access {
            prop_assert_eq!(out, Rendered::Children("children"));
        } else {
            prop_assert_eq!(out, Rendered::DeniedNotice(DENIED_NOTICE.to_string()));
        }
    }
}
