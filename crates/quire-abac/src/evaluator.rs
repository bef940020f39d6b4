//! ABAC policy evaluation engine.
//!
//! [`evaluate`] is the single entry point. It dispatches on the resource's
//! kind to the matching rule-set and returns that rule-set's [`Decision`]
//! unchanged. Kinds without a rule-set are denied.
//!
//! Evaluation is a pure function of its inputs: no I/O, no shared state, no
//! caching. Decisions are cheap to recompute and must never go stale.

use std::borrow::Cow;

use quire_types::Action;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::attributes::{Resource, Subject};
use crate::material;

pub(crate) const UNKNOWN_RESOURCE: &str = "Unknown resource type or unhandled policy.";

// ============================================================================
// Decision
// ============================================================================

/// The result of evaluating an access request.
///
/// `reason` is always populated, on allow and on deny. Consumers must gate
/// side effects on `allowed` alone and never parse `reason`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the action is permitted.
    pub allowed: bool,
    /// Human-readable explanation of why this decision was made.
    pub reason: Cow<'static, str>,
}

impl Decision {
    /// Creates an allow decision.
    pub fn allow(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            allowed: true,
            reason: reason.into(),
        }
    }

    /// Creates a deny decision.
    pub fn deny(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Evaluates whether `subject` may perform `action` on `resource`.
///
/// # Postcondition
///
/// Always returns a `Decision` with a non-empty reason. Never panics.
#[instrument(
    level = "debug",
    skip_all,
    fields(
        user_id = %subject.user_id,
        role = %subject.role,
        action = %action,
        resource_kind = %resource.kind(),
    )
)]
pub fn evaluate(subject: &Subject, action: Action, resource: &Resource) -> Decision {
    let decision = match resource {
        Resource::Material(attrs) => material::check(subject, action, attrs),
        Resource::Unclassified { .. } => Decision::deny(UNKNOWN_RESOURCE),
    };

    debug!(allowed = decision.allowed, reason = %decision.reason, "policy decision");
    decision
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::MaterialAttributes;
    use quire_types::{Role, VisibilityScope};

    fn cs_student() -> Subject {
        Subject::new("u1", Role::Student, "CS", 1)
    }

    fn material(department: &str, level: u32, visibility: VisibilityScope) -> Resource {
        MaterialAttributes::new("m1", department, level, visibility).into()
    }

    #[test]
    fn test_cross_department_download_denied() {
        let decision = evaluate(
            &cs_student(),
            Action::Download,
            &material("BIO", 1, VisibilityScope::Department),
        );

        assert!(!decision.allowed);
        assert!(decision.reason.contains("department materials"));
    }

    #[test]
    fn test_higher_level_download_denied() {
        let decision = evaluate(
            &cs_student(),
            Action::Download,
            &material("CS", 2, VisibilityScope::Department),
        );

        assert!(!decision.allowed);
        assert!(decision.reason.contains("Insufficient level"));
    }

    #[test]
    fn test_global_searchable_overrides_level() {
        let decision = evaluate(
            &cs_student(),
            Action::Download,
            &material("CS", 10, VisibilityScope::GlobalSearchable),
        );

        assert!(decision.allowed);
        assert!(decision.reason.contains("visibility"));
    }

    #[test]
    fn test_admin_download_override_same_department() {
        let admin = Subject::new("a1", Role::Admin, "CS", 1);
        let decision = evaluate(
            &admin,
            Action::Download,
            &material("CS", 5, VisibilityScope::Department),
        );

        assert!(decision.allowed);
    }

    #[test]
    fn test_librarian_download_override_same_department() {
        let librarian = Subject::new("l1", Role::Librarian, "CS", 1);
        let decision = evaluate(
            &librarian,
            Action::Download,
            &material("CS", 5, VisibilityScope::Department),
        );

        assert!(decision.allowed);
    }

    #[test]
    fn test_upload_student_same_department() {
        let decision = evaluate(
            &cs_student(),
            Action::Upload,
            &material("CS", 1, VisibilityScope::Department),
        );

        assert!(decision.allowed);
    }

    #[test]
    fn test_upload_student_other_department() {
        let decision = evaluate(
            &cs_student(),
            Action::Upload,
            &material("BIO", 1, VisibilityScope::Department),
        );

        assert!(!decision.allowed);
    }

    #[test]
    fn test_metadata_view_above_level() {
        let decision = evaluate(
            &cs_student(),
            Action::ViewMetadata,
            &material("CS", 5, VisibilityScope::Department),
        );

        assert!(decision.allowed);
    }

    #[test]
    fn test_unknown_resource_denied_for_every_action() {
        let admin = Subject::new("a1", Role::Admin, "CS", 99);
        let resource = Resource::unclassified("course");

        for action in Action::ALL {
            let decision = evaluate(&admin, action, &resource);
            assert!(!decision.allowed);
            assert!(decision.reason.contains("Unknown resource type"));
        }
    }

    #[test]
    fn test_dispatch_returns_rule_set_verdict_unchanged() {
        let subject = cs_student();
        let attrs = MaterialAttributes::new("m1", "CS", 3, VisibilityScope::Department);

        for action in Action::ALL {
            assert_eq!(
                evaluate(&subject, action, &Resource::Material(attrs.clone())),
                material::check(&subject, action, &attrs),
            );
        }
    }

    #[test]
    fn test_decision_wire_shape() {
        let json = serde_json::to_value(Decision::deny(UNKNOWN_RESOURCE)).unwrap();

        assert_eq!(json["allowed"], false);
        assert_eq!(json["reason"], UNKNOWN_RESOURCE);
    }
}
