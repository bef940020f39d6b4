//! Kani proofs for material policy evaluation
//!
//! Bounded model checking of the dispatcher and material rule-set.
//! Roles, actions, visibilities and levels are chosen symbolically;
//! department identifiers are picked from a fixed pair.
//!
//! **Proof Count**: 4 proofs
//!
//! Run with: `cargo kani --tests --harness verify_*`

#[cfg(kani)]
use crate::attributes::{MaterialAttributes, Resource, Subject};
#[cfg(kani)]
use crate::evaluator;
#[cfg(kani)]
use quire_types::{Action, Role, VisibilityScope};

#[cfg(kani)]
fn any_role() -> Role {
    Role::ALL[usize::from(kani::any::<u8>() % 3)]
}

#[cfg(kani)]
fn any_action() -> Action {
    Action::ALL[usize::from(kani::any::<u8>() % 4)]
}

#[cfg(kani)]
fn any_visibility() -> VisibilityScope {
    VisibilityScope::ALL[usize::from(kani::any::<u8>() % 3)]
}

#[cfg(kani)]
fn any_department() -> &'static str {
    if kani::any() { "CS" } else { "BIO" }
}

/// Proof: Evaluation is total with a non-empty reason
///
/// **Property**: For every symbolic request, `evaluate` returns a decision
/// whose reason is populated.
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(64)]
fn verify_evaluation_totality() {
    let subject = Subject::new("u1", any_role(), any_department(), kani::any());
    let material = MaterialAttributes::new("m1", any_department(), kani::any(), any_visibility());

    let decision = evaluator::evaluate(&subject, any_action(), &Resource::Material(material));

    assert!(!decision.reason.is_empty());
}

/// Proof: Department gate precedes download conditions
///
/// **Property**: Download across departments is denied for every role,
/// level and visibility.
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(64)]
fn verify_download_department_gate() {
    let subject = Subject::new("u1", any_role(), "CS", kani::any());
    let material = MaterialAttributes::new("m1", "BIO", kani::any(), any_visibility());

    let decision =
        evaluator::evaluate(&subject, Action::Download, &Resource::Material(material));

    assert!(!decision.allowed);
}

/// Proof: Admins cannot upload
///
/// **Property**: The upload allow-list excludes admins in every department.
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(64)]
fn verify_admin_upload_denied() {
    let subject = Subject::new("a1", Role::Admin, any_department(), kani::any());
    let material = MaterialAttributes::new("m1", any_department(), kani::any(), any_visibility());

    let decision = evaluator::evaluate(&subject, Action::Upload, &Resource::Material(material));

    assert!(!decision.allowed);
}

/// Proof: Unknown resource kinds are denied
///
/// **Property**: The dispatcher denies every action on an unclassified
/// resource.
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(64)]
fn verify_unknown_resource_denied() {
    let subject = Subject::new("u1", any_role(), any_department(), kani::any());

    let decision = evaluator::evaluate(&subject, any_action(), &Resource::unclassified("course"));

    assert!(!decision.allowed);
}

