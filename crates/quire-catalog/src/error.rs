//! Error types for the catalog gate.

use quire_types::{DepartmentId, MaterialId, UserId};
use thiserror::Error;

/// Error type for gated catalog operations.
///
/// Policy denials surface as [`GateError::Forbidden`] carrying the decision
/// reason verbatim, so a transport layer can map it to a 403.
#[derive(Debug, Error)]
pub enum GateError {
    /// No caller identity was presented, or it does not resolve to a user.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// The requested material does not exist.
    #[error("Material not found: {0}")]
    NotFound(MaterialId),

    /// The policy engine denied the action.
    #[error("Access denied: {reason}")]
    Forbidden { reason: String },

    /// The catalog backend failed.
    #[error("Catalog storage failure: {0}")]
    Storage(String),
}

impl GateError {
    /// Returns true for policy denials, as opposed to lookup or storage failures.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }
}

/// Result type for gated catalog operations.
pub type Result<T> = std::result::Result<T, GateError>;

/// Error type for loading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Failed to read the seed file.
    #[error("Failed to read seed file {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    /// The seed file is not valid TOML for the seed schema.
    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A user or material references a department that is not declared.
    #[error("{owner} references unknown department '{department}'")]
    UnknownDepartment {
        owner: String,
        department: DepartmentId,
    },

    /// A material names an uploader that is not declared.
    #[error("material '{material}' references unknown uploader '{user}'")]
    UnknownUploader { material: String, user: UserId },

    /// Two entries share an identifier.
    #[error("duplicate {kind} id '{id}'")]
    Duplicate { kind: &'static str, id: String },

    /// Inserting into the catalog failed.
    #[error(transparent)]
    Catalog(#[from] GateError),
}
