//! Catalog records and the views handed back to callers.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use quire_abac::{MaterialAttributes, Subject};
use quire_types::{DepartmentId, Level, MaterialId, Role, UserId, VisibilityScope};
use serde::{Deserialize, Serialize};

/// An academic department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub code: String,
}

/// A registered library user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub department: DepartmentId,
    #[serde(default)]
    pub level: Level,
}

impl UserRecord {
    /// Builds the subject snapshot used for one evaluation.
    pub fn subject(&self) -> Subject {
        Subject {
            user_id: self.id.clone(),
            role: self.role,
            department: self.department.clone(),
            level: self.level,
        }
    }
}

/// A stored library material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub id: MaterialId,
    pub title: String,
    pub course_code: String,
    pub department: DepartmentId,
    pub level: Level,
    pub visibility: VisibilityScope,
    pub file_path: PathBuf,
    pub uploaded_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl MaterialRecord {
    /// Builds the resource snapshot used for one evaluation.
    pub fn attributes(&self) -> MaterialAttributes {
        MaterialAttributes {
            id: self.id.clone(),
            department: self.department.clone(),
            level: self.level,
            visibility: self.visibility,
        }
    }
}

/// Caller-supplied fields for an upload.
///
/// The owning department is not part of the request: uploads always land in
/// the uploader's own department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMaterial {
    pub title: String,
    pub course_code: String,
    pub level: Level,
    #[serde(default = "default_visibility")]
    pub visibility: VisibilityScope,
    pub file_path: PathBuf,
}

fn default_visibility() -> VisibilityScope {
    VisibilityScope::Department
}

/// Material metadata as returned to a caller.
///
/// `download_allowed` is computed per caller and per request; it is a hint
/// for presentation and is never trusted by [`crate::LibraryGate::download`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialView {
    pub id: MaterialId,
    pub title: String,
    pub course_code: String,
    pub department: DepartmentId,
    pub level: Level,
    pub visibility: VisibilityScope,
    pub uploaded_by: UserId,
    pub created_at: DateTime<Utc>,
    pub download_allowed: bool,
}

impl MaterialView {
    pub fn new(record: &MaterialRecord, download_allowed: bool) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            course_code: record.course_code.clone(),
            department: record.department.clone(),
            level: record.level,
            visibility: record.visibility,
            uploaded_by: record.uploaded_by.clone(),
            created_at: record.created_at,
            download_allowed,
        }
    }
}

/// All materials of one department, grouped by level in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentLibrary {
    pub department: DepartmentId,
    pub levels: BTreeMap<Level, Vec<MaterialView>>,
}

impl DepartmentLibrary {
    /// Total number of materials across all levels.
    pub fn len(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
