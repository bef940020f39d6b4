//! Property tests for the material policy.
//!
//! Exercises the public API only: `evaluate` over generated subjects,
//! actions and materials.

use std::sync::Arc;
use std::thread;

use proptest::prelude::*;
use quire_abac::{Decision, MaterialAttributes, Resource, Subject, evaluate};
use quire_types::{Action, Role, VisibilityScope};
use test_case::test_case;

// ============================================================================
// Strategies
// ============================================================================

fn role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

fn action() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

fn visibility() -> impl Strategy<Value = VisibilityScope> {
    prop::sample::select(VisibilityScope::ALL.to_vec())
}

fn department() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["CS", "BIO", "MATH"])
}

fn download(subject: &Subject, material: MaterialAttributes) -> Decision {
    evaluate(subject, Action::Download, &Resource::Material(material))
}

// ============================================================================
// Scenarios
// ============================================================================

#[test_case("BIO", 1, VisibilityScope::Department, false, "department materials" ; "cross department")]
#[test_case("CS", 2, VisibilityScope::Department, false, "Insufficient level" ; "above level")]
#[test_case("CS", 10, VisibilityScope::GlobalSearchable, true, "visibility" ; "globally searchable")]
#[test_case("CS", 1, VisibilityScope::Department, true, "level" ; "at level")]
fn student_download_scenarios(
    material_department: &str,
    material_level: u32,
    visibility: VisibilityScope,
    allowed: bool,
    reason_fragment: &str,
) {
    let student = Subject::new("u1", Role::Student, "CS", 1);
    let material = MaterialAttributes::new("m1", material_department, material_level, visibility);

    let decision = download(&student, material);

    assert_eq!(decision.allowed, allowed);
    assert!(
        decision.reason.contains(reason_fragment),
        "reason {:?} should mention {reason_fragment:?}",
        decision.reason
    );
}

#[test]
fn admin_downloads_above_level_in_own_department() {
    let admin = Subject::new("a1", Role::Admin, "CS", 1);
    let material = MaterialAttributes::new("m1", "CS", 5, VisibilityScope::Department);

    assert!(download(&admin, material).allowed);
}

#[test]
fn evaluation_is_safe_across_threads() {
    let subject = Arc::new(Subject::new("u1", Role::Student, "CS", 1));
    let resource = Arc::new(Resource::Material(MaterialAttributes::new(
        "m1",
        "CS",
        2,
        VisibilityScope::Department,
    )));
    let expected = evaluate(&subject, Action::Download, &resource);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let subject = Arc::clone(&subject);
            let resource = Arc::clone(&resource);
            thread::spawn(move || evaluate(&subject, Action::Download, &resource))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Property: Every request yields a decision with a non-empty reason
    #[test]
    fn prop_evaluation_is_total(
        role in role(),
        action in action(),
        visibility in visibility(),
        subject_department in department(),
        material_department in department(),
        subject_level in 0u32..20,
        material_level in 0u32..20,
    ) {
        let subject = Subject::new("u1", role, subject_department, subject_level);
        let material = MaterialAttributes::new("m1", material_department, material_level, visibility);

        let decision = evaluate(&subject, action, &Resource::Material(material));
        prop_assert!(!decision.reason.is_empty());
    }

    /// Property: Identical inputs yield identical decisions
    #[test]
    fn prop_evaluation_is_deterministic(
        role in role(),
        action in action(),
        visibility in visibility(),
        material_department in department(),
        subject_level in any::<u32>(),
        material_level in any::<u32>(),
    ) {
        let subject = Subject::new("u1", role, "CS", subject_level);
        let resource = Resource::Material(
            MaterialAttributes::new("m1", material_department, material_level, visibility),
        );

        prop_assert_eq!(
            evaluate(&subject, action, &resource),
            evaluate(&subject, action, &resource)
        );
    }

    /// Property: Download across departments is denied regardless of role, level or visibility
    #[test]
    fn prop_download_department_gate(
        role in role(),
        visibility in visibility(),
        subject_level in any::<u32>(),
        material_level in any::<u32>(),
    ) {
        let subject = Subject::new("u1", role, "CS", subject_level);
        let material = MaterialAttributes::new("m1", "BIO", material_level, visibility);

        let decision = download(&subject, material);
        prop_assert!(!decision.allowed);
        prop_assert!(decision.reason.contains("department materials"));
    }

    /// Property: Material at or below the subject's level is downloadable in-department
    #[test]
    fn prop_download_within_level(
        role in role(),
        visibility in visibility(),
        (subject_level, material_level) in (0u32..1000).prop_flat_map(|s| (Just(s), 0..=s)),
    ) {
        let subject = Subject::new("u1", role, "CS", subject_level);
        let material = MaterialAttributes::new("m1", "CS", material_level, visibility);

        prop_assert!(download(&subject, material).allowed);
    }

    /// Property: Globally searchable material is downloadable in-department at any level
    #[test]
    fn prop_download_globally_searchable(
        role in role(),
        subject_level in 0u32..10,
        material_level in 10u32..u32::MAX,
    ) {
        let subject = Subject::new("u1", role, "CS", subject_level);
        let material =
            MaterialAttributes::new("m1", "CS", material_level, VisibilityScope::GlobalSearchable);

        prop_assert!(download(&subject, material).allowed);
    }

    /// Property: Librarians and admins download department-restricted material above their level
    #[test]
    fn prop_download_privileged_roles(
        role in prop::sample::select(vec![Role::Librarian, Role::Admin]),
        subject_level in 0u32..10,
        material_level in 10u32..u32::MAX,
    ) {
        let subject = Subject::new("u1", role, "CS", subject_level);
        let material =
            MaterialAttributes::new("m1", "CS", material_level, VisibilityScope::Department);

        prop_assert!(download(&subject, material).allowed);
    }

    /// Property: Students are denied non-global material above their level
    #[test]
    fn prop_download_student_above_level_denied(
        visibility in prop::sample::select(vec![VisibilityScope::Department, VisibilityScope::LevelOnly]),
        subject_level in 0u32..10,
        material_level in 10u32..u32::MAX,
    ) {
        let subject = Subject::new("u1", Role::Student, "CS", subject_level);
        let material = MaterialAttributes::new("m1", "CS", material_level, visibility);

        let decision = download(&subject, material);
        prop_assert!(!decision.allowed);
        prop_assert!(decision.reason.contains("Insufficient level"));
    }

    /// Property: Upload requires student or librarian in the material's department
    #[test]
    fn prop_upload_gate(
        role in role(),
        visibility in visibility(),
        material_department in department(),
        level in any::<u32>(),
    ) {
        let subject = Subject::new("u1", role, "CS", level);
        let material = MaterialAttributes::new("m1", material_department, level, visibility);

        let decision = evaluate(&subject, Action::Upload, &Resource::Material(material));
        let expected = role != Role::Admin && material_department == "CS";
        prop_assert_eq!(decision.allowed, expected);
    }

    /// Property: Delete is admin anywhere, or librarian in-department
    #[test]
    fn prop_delete_gate(
        role in role(),
        visibility in visibility(),
        material_department in department(),
        level in any::<u32>(),
    ) {
        let subject = Subject::new("u1", role, "CS", level);
        let material = MaterialAttributes::new("m1", material_department, level, visibility);

        let decision = evaluate(&subject, Action::Delete, &Resource::Material(material));
        let expected = match role {
            Role::Admin => true,
            Role::Librarian => material_department == "CS",
            Role::Student => false,
        };
        prop_assert_eq!(decision.allowed, expected);
    }

    /// Property: Metadata view depends on department only
    #[test]
    fn prop_view_metadata_gate(
        role in role(),
        visibility in visibility(),
        material_department in department(),
        subject_level in any::<u32>(),
        material_level in any::<u32>(),
    ) {
        let subject = Subject::new("u1", role, "CS", subject_level);
        let material = MaterialAttributes::new("m1", material_department, material_level, visibility);

        let decision = evaluate(&subject, Action::ViewMetadata, &Resource::Material(material));
        prop_assert_eq!(decision.allowed, material_department == "CS");
    }

    /// Property: Unknown resource kinds are always denied
    #[test]
    fn prop_unknown_kind_denied(
        role in role(),
        action in action(),
        kind in "[a-z]{1,12}",
    ) {
        let subject = Subject::new("u1", role, "CS", 1);

        let decision = evaluate(&subject, action, &Resource::unclassified(&kind));
        prop_assert!(!decision.allowed);
        prop_assert!(decision.reason.contains("Unknown resource type"));
    }
}
