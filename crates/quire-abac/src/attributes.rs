//! Attribute snapshots for ABAC evaluation.
//!
//! Two attribute categories drive access decisions:
//! - **Subject attributes**: Who is asking (role, department, level)
//! - **Resource attributes**: What is being accessed, tagged by kind
//!
//! Snapshots are built by the caller immediately before a single evaluation
//! and carry no identity beyond that call.

use quire_types::{DepartmentId, Level, MaterialId, Role, UserId, VisibilityScope};
use serde::{Deserialize, Serialize};

// ============================================================================
// Subject
// ============================================================================

/// Attributes describing the user making the access request.
///
/// Populated by the identity provider. Every field is required; a caller
/// that cannot supply one must reject the request before evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// The requesting user.
    pub user_id: UserId,
    /// The user's role.
    pub role: Role,
    /// The department the user belongs to.
    pub department: DepartmentId,
    /// The user's academic level.
    pub level: Level,
}

impl Subject {
    pub fn new(
        user_id: impl Into<UserId>,
        role: Role,
        department: impl Into<DepartmentId>,
        level: u32,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            department: department.into(),
            level: Level::new(level),
        }
    }

    /// Returns true if the subject belongs to `department`.
    pub fn is_member_of(&self, department: &DepartmentId) -> bool {
        self.department == *department
    }

    /// Returns true if the subject's role is one of `roles`.
    pub fn has_role_in(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

// ============================================================================
// Material
// ============================================================================

/// Attributes describing a library material.
///
/// Populated from the catalog record at request time. For uploads the
/// record does not exist yet; the caller builds the snapshot with the
/// subject's own department as the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialAttributes {
    /// The material being accessed.
    pub id: MaterialId,
    /// The department that owns the material.
    pub department: DepartmentId,
    /// The academic level the material is written for.
    pub level: Level,
    /// How widely the material is exposed.
    pub visibility: VisibilityScope,
}

impl MaterialAttributes {
    pub fn new(
        id: impl Into<MaterialId>,
        department: impl Into<DepartmentId>,
        level: u32,
        visibility: VisibilityScope,
    ) -> Self {
        Self {
            id: id.into(),
            department: department.into(),
            level: Level::new(level),
            visibility,
        }
    }
}

// ============================================================================
// Resource
// ============================================================================

/// Discriminator for resource types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Material,
    /// Any kind no rule-set is written for.
    Other(String),
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Material => f.write_str("material"),
            Self::Other(kind) => f.write_str(kind),
        }
    }
}

/// A resource presented for evaluation, tagged by kind.
///
/// The dispatcher matches on this exhaustively. Supporting a new kind means
/// adding a variant here, a rule-set module, and one match arm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resource {
    /// A library material.
    Material(MaterialAttributes),
    /// A resource whose kind has no rule-set. Always denied.
    Unclassified {
        /// Declared kind, kept for logging.
        declared_kind: String,
    },
}

impl Resource {
    /// Returns the kind tag used for dispatch.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Material(_) => ResourceKind::Material,
            Self::Unclassified { declared_kind } => ResourceKind::Other(declared_kind.clone()),
        }
    }

    pub fn unclassified(declared_kind: &str) -> Self {
        Self::Unclassified {
            declared_kind: declared_kind.to_string(),
        }
    }
}

impl From<MaterialAttributes> for Resource {
    fn from(material: MaterialAttributes) -> Self {
        Self::Material(material)
    }
}

// ============================================================================
// Tests
// ============================================================================
