//! Material rule-set.
//!
//! One rule per [`Action`], evaluated independently. Every rule returns a
//! [`Decision`] carrying a reason, on allow and on deny.
//!
//! | Action       | Allowed when                                                      |
//! |--------------|-------------------------------------------------------------------|
//! | Upload       | role ∈ {student, librarian} and same department                   |
//! | ViewMetadata | same department                                                   |
//! | Download     | same department, and one of: level ≤ subject level, globally      |
//! |              | searchable, role ∈ {librarian, admin}                             |
//! | Delete       | admin, or librarian of the same department                        |
//!
//! Admins are absent from the upload allow-list. The download department
//! gate applies to every role, admin included.

use quire_types::{Action, Role};

use crate::attributes::{MaterialAttributes, Subject};
use crate::evaluator::Decision;

/// Roles permitted to upload into their own department.
const UPLOAD_ROLES: [Role; 2] = [Role::Student, Role::Librarian];

/// Roles that may download department material regardless of level or visibility.
const DOWNLOAD_OVERRIDE_ROLES: [Role; 2] = [Role::Librarian, Role::Admin];

pub(crate) const DEFAULT_DENY: &str = "Action not permitted by default.";

pub(crate) const UPLOAD_ALLOWED: &str =
    "Upload allowed for students and librarians within their department.";
pub(crate) const UPLOAD_DENIED: &str = "Upload restricted to department students and librarians.";

pub(crate) const METADATA_ALLOWED: &str = "Metadata view allowed within department.";
pub(crate) const METADATA_DENIED: &str = "Metadata view restricted to department members.";

pub(crate) const DOWNLOAD_ALLOWED: &str = "Download authorized based on level, visibility, or role.";
pub(crate) const DOWNLOAD_WRONG_DEPARTMENT: &str = "Download restricted to department materials.";
pub(crate) const DOWNLOAD_INSUFFICIENT: &str = "Insufficient level or visibility for download.";

pub(crate) const DELETE_ALLOWED: &str = "Delete allowed for admins or department librarians.";
pub(crate) const DELETE_DENIED: &str = "Delete restricted to admins and department librarians.";

/// Decides whether `subject` may perform `action` on `material`.
///
/// # Postcondition
///
/// Always returns a `Decision` with a non-empty reason.
pub fn check(subject: &Subject, action: Action, material: &MaterialAttributes) -> Decision {
    match action {
        Action::Upload => check_upload(subject, material),
        Action::ViewMetadata => check_view_metadata(subject, material),
        Action::Download => check_download(subject, material),
        Action::Delete => check_delete(subject, material),
        _ => default_decision(),
    }
}

/// The decision reached when no rule applies.
///
/// `Action` is `#[non_exhaustive]`; an action with no rule here is denied.
fn default_decision() -> Decision {
    Decision::deny(DEFAULT_DENY)
}

fn check_upload(subject: &Subject, material: &MaterialAttributes) -> Decision {
    if subject.has_role_in(&UPLOAD_ROLES) && subject.is_member_of(&material.department) {
        return Decision::allow(UPLOAD_ALLOWED);
    }
    Decision::deny(UPLOAD_DENIED)
}

fn check_view_metadata(subject: &Subject, material: &MaterialAttributes) -> Decision {
    if subject.is_member_of(&material.department) {
        return Decision::allow(METADATA_ALLOWED);
    }
    Decision::deny(METADATA_DENIED)
}

fn check_download(subject: &Subject, material: &MaterialAttributes) -> Decision {
    // Department gate comes first, for every role.
    if !subject.is_member_of(&material.department) {
        return Decision::deny(DOWNLOAD_WRONG_DEPARTMENT);
    }

    let within_level = material.level <= subject.level;
    let globally_searchable = material.visibility.is_globally_searchable();
    let privileged = subject.has_role_in(&DOWNLOAD_OVERRIDE_ROLES);

    if within_level || globally_searchable || privileged {
        return Decision::allow(DOWNLOAD_ALLOWED);
    }
    Decision::deny(DOWNLOAD_INSUFFICIENT)
}

fn check_delete(subject: &Subject, material: &MaterialAttributes) -> Decision {
    let department_librarian =
        subject.role == Role::Librarian && subject.is_member_of(&material.department);

    if subject.role == Role::Admin || department_librarian {
        return Decision::allow(DELETE_ALLOWED);
    }
    Decision::deny(DELETE_DENIED)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quire_types::VisibilityScope;
    use test_case::test_case;

    fn subject(role: Role, department: &str, level: u32) -> Subject {
        Subject::new("u1", role, department, level)
    }

    fn material(department: &str, level: u32, visibility: VisibilityScope) -> MaterialAttributes {
        MaterialAttributes::new("m1", department, level, visibility)
    }

    // -- Upload --

    #[test_case(Role::Student, true ; "student")]
    #[test_case(Role::Librarian, true ; "librarian")]
    #[test_case(Role::Admin, false ; "admin has no upload bypass")]
    fn test_upload_same_department(role: Role, expected: bool) {
        let decision = check(
            &subject(role, "CS", 1),
            Action::Upload,
            &material("CS", 1, VisibilityScope::Department),
        );
        assert_eq!(decision.allowed, expected);
    }

    #[test_case(Role::Student ; "student")]
    #[test_case(Role::Librarian ; "librarian")]
    #[test_case(Role::Admin ; "admin")]
    fn test_upload_other_department_denied(role: Role) {
        let decision = check(
            &subject(role, "CS", 1),
            Action::Upload,
            &material("BIO", 1, VisibilityScope::Department),
        );
        assert!(!decision.allowed);
        assert_eq!(decision.reason, UPLOAD_DENIED);
    }

    // -- View metadata --

    #[test]
    fn test_metadata_ignores_level_and_role() {
        for role in Role::ALL {
            let decision = check(
                &subject(role, "CS", 0),
                Action::ViewMetadata,
                &material("CS", 9, VisibilityScope::Department),
            );
            assert!(decision.allowed, "{role} should view same-department metadata");
            assert_eq!(decision.reason, METADATA_ALLOWED);
        }
    }

    #[test]
    fn test_metadata_other_department_denied() {
        let decision = check(
            &subject(Role::Admin, "ADMIN", 5),
            Action::ViewMetadata,
            &material("CS", 1, VisibilityScope::GlobalSearchable),
        );
        assert!(!decision.allowed);
        assert_eq!(decision.reason, METADATA_DENIED);
    }

    // -- Download --

    #[test]
    fn test_download_department_gate_applies_to_admin() {
        let decision = check(
            &subject(Role::Admin, "ADMIN", 10),
            Action::Download,
            &material("CS", 1, VisibilityScope::GlobalSearchable),
        );
        assert!(!decision.allowed);
        assert_eq!(decision.reason, DOWNLOAD_WRONG_DEPARTMENT);
    }

    #[test]
    fn test_download_within_level() {
        let decision = check(
            &subject(Role::Student, "CS", 3),
            Action::Download,
            &material("CS", 3, VisibilityScope::Department),
        );
        assert!(decision.allowed);
        assert_eq!(decision.reason, DOWNLOAD_ALLOWED);
    }

    #[test]
    fn test_download_level_only_is_inert() {
        // LEVEL_ONLY carries no policy meaning: it behaves like DEPARTMENT.
        let above = check(
            &subject(Role::Student, "CS", 1),
            Action::Download,
            &material("CS", 2, VisibilityScope::LevelOnly),
        );
        assert!(!above.allowed);
        assert_eq!(above.reason, DOWNLOAD_INSUFFICIENT);

        let other_department = check(
            &subject(Role::Student, "CS", 5),
            Action::Download,
            &material("BIO", 1, VisibilityScope::LevelOnly),
        );
        assert!(!other_department.allowed);
        assert_eq!(other_department.reason, DOWNLOAD_WRONG_DEPARTMENT);
    }

    #[test_case(Role::Librarian ; "librarian")]
    #[test_case(Role::Admin ; "admin")]
    fn test_download_privileged_role_overrides_level(role: Role) {
        let decision = check(
            &subject(role, "CS", 0),
            Action::Download,
            &material("CS", 8, VisibilityScope::Department),
        );
        assert!(decision.allowed);
    }

    // -- Delete --

    #[test]
    fn test_delete_admin_any_department() {
        let decision = check(
            &subject(Role::Admin, "ADMIN", 0),
            Action::Delete,
            &material("BIO", 4, VisibilityScope::Department),
        );
        assert!(decision.allowed);
        assert_eq!(decision.reason, DELETE_ALLOWED);
    }

    #[test]
    fn test_delete_librarian_needs_same_department() {
        let same = check(
            &subject(Role::Librarian, "CS", 0),
            Action::Delete,
            &material("CS", 4, VisibilityScope::Department),
        );
        assert!(same.allowed);

        let other = check(
            &subject(Role::Librarian, "CS", 0),
            Action::Delete,
            &material("BIO", 4, VisibilityScope::Department),
        );
        assert!(!other.allowed);
        assert_eq!(other.reason, DELETE_DENIED);
    }

    #[test]
    fn test_delete_student_always_denied() {
        let decision = check(
            &subject(Role::Student, "CS", 9),
            Action::Delete,
            &material("CS", 1, VisibilityScope::GlobalSearchable),
        );
        assert!(!decision.allowed);
    }

    #[test]
    fn test_default_decision_denies() {
        let decision = default_decision();
        assert!(!decision.allowed);
        assert_eq!(decision.reason, DEFAULT_DENY);
    }
}
