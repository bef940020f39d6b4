//! # quire-types: Core types for `Quire`
//!
//! This crate contains the shared vocabulary used across the `Quire` system:
//! - Entity IDs ([`UserId`], [`DepartmentId`], [`MaterialId`])
//! - Academic standing ([`Level`])
//! - Closed enumerations ([`Role`], [`Action`], [`VisibilityScope`])
//!
//! Every enumeration parses from its wire name with [`std::str::FromStr`].
//! Unknown values are rejected here, at the boundary, so that policy
//! evaluation only ever sees well-formed values.

use std::fmt::{Debug, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Parse Errors
// ============================================================================

/// Error returned when a string does not name a known enumeration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The value is not one of the closed set for `kind`.
    #[error("unknown {kind} '{value}' (expected one of: {expected})")]
    Unknown {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },

    /// An identifier was empty or whitespace only.
    #[error("{kind} must not be empty")]
    EmptyId { kind: &'static str },
}

/// Normalizes a wire value for case-insensitive matching.
///
/// `view-metadata`, `view_metadata` and `VIEW_METADATA` all normalize to
/// `VIEW_METADATA`.
fn normalize(value: &str) -> String {
    value.trim().replace(['-', ' '], "_").to_uppercase()
}

// ============================================================================
// Entity IDs
// ============================================================================

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Parses an identifier, rejecting empty or blank input.
            pub fn parse(id: &str) -> Result<Self, ParseError> {
                let trimmed = id.trim();
                if trimmed.is_empty() {
                    return Err(ParseError::EmptyId { kind: $kind });
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

string_id!(
    /// Unique identifier for a library user.
    UserId,
    "user id"
);

string_id!(
    /// Identifier for an academic department (e.g. `"CS"`, `"BIO"`).
    ///
    /// Departments are the tenancy boundary of the library: nearly every
    /// policy rule compares the subject's department with the resource's.
    DepartmentId,
    "department id"
);

string_id!(
    /// Unique identifier for a library material.
    MaterialId,
    "material id"
);

impl MaterialId {
    /// Generates a fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

// ============================================================================
// Level
// ============================================================================

/// Academic level of a user or material.
///
/// Levels start at 0 and have no declared upper bound. Comparison is plain
/// integer ordering: a material at level 2 is "above" a user at level 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Level(u32);

impl Level {
    pub const ZERO: Level = Level(0);

    pub fn new(level: u32) -> Self {
        Self(level)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Level {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> Self {
        level.0
    }
}

// ============================================================================
// Role
// ============================================================================

/// Role of a library user.
///
/// This set is closed. Adding a role changes the meaning of every rule-set
/// that matches on roles and must be reviewed together with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Enrolled student. May upload to, and read from, their own department.
    Student,
    /// Department librarian. Curates the department collection.
    Librarian,
    /// Institution administrator.
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Librarian, Role::Admin];

    /// Returns the wire name of this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Librarian => "librarian",
            Self::Admin => "admin",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "STUDENT" => Ok(Self::Student),
            "LIBRARIAN" => Ok(Self::Librarian),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(ParseError::Unknown {
                kind: "role",
                value: s.to_string(),
                expected: "student, librarian, admin",
            }),
        }
    }
}

// ============================================================================
// Action
// ============================================================================

/// An operation a subject attempts on a resource.
///
/// Marked `#[non_exhaustive]` so every rule-set outside this crate carries a
/// default arm, and that arm denies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum Action {
    /// Add a new material to a department collection.
    Upload,
    /// Read a material's descriptive metadata (title, course, level).
    ViewMetadata,
    /// Fetch a material's file content.
    Download,
    /// Remove a material from the collection.
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Upload,
        Action::ViewMetadata,
        Action::Download,
        Action::Delete,
    ];

    /// Returns the wire name of this action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "UPLOAD",
            Self::ViewMetadata => "VIEW_METADATA",
            Self::Download => "DOWNLOAD",
            Self::Delete => "DELETE",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "UPLOAD" => Ok(Self::Upload),
            "VIEW_METADATA" | "METADATA" => Ok(Self::ViewMetadata),
            "DOWNLOAD" => Ok(Self::Download),
            "DELETE" => Ok(Self::Delete),
            _ => Err(ParseError::Unknown {
                kind: "action",
                value: s.to_string(),
                expected: "UPLOAD, VIEW_METADATA, DOWNLOAD, DELETE",
            }),
        }
    }
}

// ============================================================================
// Visibility Scope
// ============================================================================

/// How widely a material is exposed.
///
/// The stored domain has three values but the material policy only branches
/// on [`VisibilityScope::GlobalSearchable`]. [`VisibilityScope::LevelOnly`]
/// is accepted and persisted, and carries no policy meaning of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisibilityScope {
    /// Reserved in the catalog schema; inert in policy.
    LevelOnly,
    /// Restricted to the owning department.
    Department,
    /// Discoverable and downloadable by the owning department regardless of level.
    GlobalSearchable,
}

impl VisibilityScope {
    pub const ALL: [VisibilityScope; 3] = [
        VisibilityScope::LevelOnly,
        VisibilityScope::Department,
        VisibilityScope::GlobalSearchable,
    ];

    /// Returns the wire name of this scope.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LevelOnly => "LEVEL_ONLY",
            Self::Department => "DEPARTMENT",
            Self::GlobalSearchable => "GLOBAL_SEARCHABLE",
        }
    }

    pub fn is_globally_searchable(self) -> bool {
        matches!(self, Self::GlobalSearchable)
    }
}

impl Display for VisibilityScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisibilityScope {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "LEVEL_ONLY" => Ok(Self::LevelOnly),
            "DEPARTMENT" => Ok(Self::Department),
            "GLOBAL_SEARCHABLE" | "GLOBAL" => Ok(Self::GlobalSearchable),
            _ => Err(ParseError::Unknown {
                kind: "visibility scope",
                value: s.to_string(),
                expected: "LEVEL_ONLY, DEPARTMENT, GLOBAL_SEARCHABLE",
            }),
        }
    }
}
