//! Policy enforcement around catalog operations.
//!
//! [`LibraryGate`] is the decision consumer: each operation builds fresh
//! attribute snapshots, asks [`quire_abac::evaluate`] for a decision and
//! performs its side effect only when the decision allows it. Denials are
//! returned as [`GateError::Forbidden`] with the decision reason verbatim.
//!
//! Lookups precede policy: a missing material is reported as
//! [`GateError::NotFound`] before any rule runs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Utc;
use quire_abac::{Decision, MaterialAttributes, Resource, Subject, evaluate};
use quire_types::{Action, DepartmentId, Level, MaterialId};
use tracing::{info, warn};

use crate::error::{GateError, Result};
use crate::records::{DepartmentLibrary, MaterialRecord, MaterialView, NewMaterial};
use crate::store::Catalog;

/// Reason given when browsing another department's library.
pub const OTHER_DEPARTMENT_LIBRARY: &str = "Access denied to other department libraries.";

/// Enforces material policy on top of a [`Catalog`].
pub struct LibraryGate<C> {
    catalog: C,

    /// Whether to log access attempts.
    audit_enabled: bool,
}

impl<C: Catalog> LibraryGate<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            audit_enabled: true,
        }
    }

    /// Disables audit logging (for testing).
    pub fn without_audit(mut self) -> Self {
        self.audit_enabled = false;
        self
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Stores a new material in the subject's department.
    ///
    /// The target department is always the uploader's own; callers cannot
    /// choose another one.
    pub fn upload(&self, subject: &Subject, new: NewMaterial) -> Result<MaterialView> {
        let attributes = MaterialAttributes {
            id: MaterialId::generate(),
            department: subject.department.clone(),
            level: new.level,
            visibility: new.visibility,
        };
        self.enforce(subject, Action::Upload, &attributes)?;

        let record = MaterialRecord {
            id: attributes.id,
            title: new.title,
            course_code: new.course_code,
            department: attributes.department,
            level: attributes.level,
            visibility: attributes.visibility,
            file_path: new.file_path,
            uploaded_by: subject.user_id.clone(),
            created_at: Utc::now(),
        };
        self.catalog.insert(record.clone())?;

        Ok(view_for(subject, &record))
    }

    /// Returns a material's metadata with the caller's download flag.
    pub fn metadata(&self, subject: &Subject, id: &MaterialId) -> Result<MaterialView> {
        let record = self.fetch(id)?;
        self.enforce(subject, Action::ViewMetadata, &record.attributes())?;
        Ok(view_for(subject, &record))
    }

    /// Returns the stored file location of a material the caller may download.
    pub fn download(&self, subject: &Subject, id: &MaterialId) -> Result<PathBuf> {
        let record = self.fetch(id)?;
        self.enforce(subject, Action::Download, &record.attributes())?;
        Ok(record.file_path)
    }

    /// Removes a material, returning the deleted record.
    pub fn delete(&self, subject: &Subject, id: &MaterialId) -> Result<MaterialRecord> {
        let record = self.fetch(id)?;
        self.enforce(subject, Action::Delete, &record.attributes())?;

        self.catalog
            .remove(id)?
            .ok_or_else(|| GateError::NotFound(id.clone()))
    }

    /// Materials of the subject's own department and level.
    pub fn shelf(&self, subject: &Subject) -> Result<Vec<MaterialView>> {
        Ok(self
            .catalog
            .by_department(&subject.department)?
            .iter()
            .filter(|record| record.level == subject.level)
            .map(|record| view_for(subject, record))
            .collect())
    }

    /// Every material of `department`, grouped by level.
    ///
    /// Only the subject's own department may be browsed.
    pub fn department_library(
        &self,
        subject: &Subject,
        department: &DepartmentId,
    ) -> Result<DepartmentLibrary> {
        if !subject.is_member_of(department) {
            self.audit(subject, "department_library", department.as_str(), false);
            return Err(GateError::Forbidden {
                reason: OTHER_DEPARTMENT_LIBRARY.to_string(),
            });
        }

        let mut levels: BTreeMap<Level, Vec<MaterialView>> = BTreeMap::new();
        for record in self.catalog.by_department(department)? {
            levels
                .entry(record.level)
                .or_default()
                .push(view_for(subject, &record));
        }

        Ok(DepartmentLibrary {
            department: department.clone(),
            levels,
        })
    }

    fn fetch(&self, id: &MaterialId) -> Result<MaterialRecord> {
        self.catalog
            .get(id)?
            .ok_or_else(|| GateError::NotFound(id.clone()))
    }

    fn enforce(
        &self,
        subject: &Subject,
        action: Action,
        material: &MaterialAttributes,
    ) -> Result<Decision> {
        let decision = evaluate(subject, action, &Resource::Material(material.clone()));
        self.audit(subject, action.as_str(), material.id.as_str(), decision.allowed);

        if decision.allowed {
            Ok(decision)
        } else {
            Err(GateError::Forbidden {
                reason: decision.reason.into_owned(),
            })
        }
    }

    fn audit(&self, subject: &Subject, action: &str, target: &str, allowed: bool) {
        if !self.audit_enabled {
            return;
        }
        if allowed {
            info!(
                user_id = %subject.user_id,
                role = %subject.role,
                action,
                target,
                "Library access granted"
            );
        } else {
            warn!(
                user_id = %subject.user_id,
                role = %subject.role,
                action,
                target,
                "Library access denied"
            );
        }
    }
}

/// Builds the caller's view of a record, with a fresh download verdict.
fn view_for(subject: &Subject, record: &MaterialRecord) -> MaterialView {
    let download = evaluate(
        subject,
        Action::Download,
        &Resource::Material(record.attributes()),
    );
    MaterialView::new(record, download.allowed)
}
