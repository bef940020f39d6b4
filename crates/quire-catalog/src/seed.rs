//! Seed files: declarative bootstrap data for a catalog and directory.
//!
//! ```toml
//! [[departments]]
//! id = "CS"
//! name = "Computer Science"
//! code = "CS"
//!
//! [[users]]
//! id = "admin"
//! email = "admin@school.edu"
//! role = "admin"
//! department = "CS"
//! level = 0
//!
//! [[materials]]
//! title = "Data Structures Notes"
//! course_code = "CS201"
//! department = "CS"
//! level = 2
//! visibility = "GLOBAL_SEARCHABLE"
//! file_path = "uploads/ds-notes.pdf"
//! uploaded_by = "admin"
//! created_at = 2024-09-02T09:00:00Z
//! ```
//!
//! `created_at` may be a TOML datetime or an RFC 3339 string; a datetime
//! without an offset is read as UTC. Seeded materials bypass the upload
//! rule; the file is trusted input.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use quire_types::{DepartmentId, Level, MaterialId, Role, UserId, VisibilityScope};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::directory::Directory;
use crate::error::SeedError;
use crate::gate::LibraryGate;
use crate::records::{Department, MaterialRecord, UserRecord};
use crate::store::{Catalog, InMemoryCatalog};

/// A material entry in a seed file. `id` and `created_at` are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedMaterial {
    #[serde(default)]
    pub id: Option<MaterialId>,
    pub title: String,
    pub course_code: String,
    pub department: DepartmentId,
    pub level: Level,
    #[serde(default = "default_visibility")]
    pub visibility: VisibilityScope,
    pub file_path: PathBuf,
    pub uploaded_by: UserId,
    #[serde(default, deserialize_with = "deserialize_created_at")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_visibility() -> VisibilityScope {
    VisibilityScope::Department
}

/// Accepts both a native TOML datetime and a quoted RFC 3339 string.
fn deserialize_created_at<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<toml::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let text = match value {
        toml::Value::String(text) => text,
        toml::Value::Datetime(datetime) => {
            if datetime.date.is_none() || datetime.time.is_none() {
                return Err(D::Error::custom(format!(
                    "created_at needs both a date and a time, found {datetime}"
                )));
            }
            if datetime.offset.is_none() {
                format!("{datetime}Z")
            } else {
                datetime.to_string()
            }
        }
        other => {
            return Err(D::Error::custom(format!(
                "created_at must be a datetime, found {}",
                other.type_str()
            )));
        }
    };

    DateTime::parse_from_rfc3339(&text)
        .map(|parsed| Some(parsed.with_timezone(&Utc)))
        .map_err(|e| D::Error::custom(format!("invalid created_at '{text}': {e}")))
}

/// Parsed seed file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub materials: Vec<SeedMaterial>,
}

/// A populated catalog behind its gate, plus the users and departments.
pub struct SeededLibrary {
    pub departments: Vec<Department>,
    pub directory: Directory,
    pub gate: LibraryGate<InMemoryCatalog>,
}

impl Seed {
    /// The minimal bootstrap set: Computer Science and Biology departments
    /// and one level-0 admin in Computer Science.
    pub fn bootstrap() -> Self {
        Self {
            departments: vec![
                Department {
                    id: DepartmentId::new("CS"),
                    name: "Computer Science".to_string(),
                    code: "CS".to_string(),
                },
                Department {
                    id: DepartmentId::new("BIO"),
                    name: "Biology".to_string(),
                    code: "BIO".to_string(),
                },
            ],
            users: vec![UserRecord {
                id: UserId::new("admin"),
                email: "admin@school.edu".to_string(),
                role: Role::Admin,
                department: DepartmentId::new("CS"),
                level: Level::ZERO,
            }],
            materials: Vec::new(),
        }
    }

    /// Parses seed TOML.
    pub fn from_toml(contents: &str) -> Result<Self, SeedError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses a seed file.
    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Validates references and builds the library.
    pub fn load(self) -> Result<SeededLibrary, SeedError> {
        let departments = unique(
            "department",
            self.departments.iter().map(|d| d.id.to_string()),
        )?;
        let users = unique("user", self.users.iter().map(|u| u.id.to_string()))?;
        unique(
            "material",
            self.materials
                .iter()
                .filter_map(|m| m.id.as_ref().map(ToString::to_string)),
        )?;

        let directory = Directory::new();
        for user in self.users {
            if !departments.contains(user.department.as_str()) {
                return Err(SeedError::UnknownDepartment {
                    owner: format!("user '{}'", user.id),
                    department: user.department,
                });
            }
            directory.register(user)?;
        }

        let catalog = InMemoryCatalog::new();
        for material in self.materials {
            if !departments.contains(material.department.as_str()) {
                return Err(SeedError::UnknownDepartment {
                    owner: format!("material '{}'", material.title),
                    department: material.department,
                });
            }
            if !users.contains(material.uploaded_by.as_str()) {
                return Err(SeedError::UnknownUploader {
                    material: material.title,
                    user: material.uploaded_by,
                });
            }
            catalog.insert(MaterialRecord {
                id: material.id.unwrap_or_else(MaterialId::generate),
                title: material.title,
                course_code: material.course_code,
                department: material.department,
                level: material.level,
                visibility: material.visibility,
                file_path: material.file_path,
                uploaded_by: material.uploaded_by,
                created_at: material.created_at.unwrap_or_else(Utc::now),
            })?;
        }

        debug!(
            departments = self.departments.len(),
            users = directory.len()?,
            materials = catalog.len()?,
            "seed loaded"
        );

        Ok(SeededLibrary {
            departments: self.departments,
            directory,
            gate: LibraryGate::new(catalog),
        })
    }
}

fn unique(
    kind: &'static str,
    ids: impl Iterator<Item = String>,
) -> Result<HashSet<String>, SeedError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.clone()) {
            return Err(SeedError::Duplicate { kind, id });
        }
    }
    Ok(seen)
}
