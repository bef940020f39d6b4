//! Material storage.
//!
//! [`Catalog`] is the resource provider consulted by the gate. It knows
//! nothing about policy; every method is a plain lookup or mutation.

use std::collections::HashMap;
use std::sync::RwLock;

use quire_types::{DepartmentId, MaterialId};

use crate::error::{GateError, Result};
use crate::records::MaterialRecord;

/// Storage backend for material records.
pub trait Catalog: Send + Sync {
    /// Fetches a material by id.
    fn get(&self, id: &MaterialId) -> Result<Option<MaterialRecord>>;

    /// Inserts or replaces a material.
    fn insert(&self, record: MaterialRecord) -> Result<()>;

    /// Removes a material, returning it if it existed.
    fn remove(&self, id: &MaterialId) -> Result<Option<MaterialRecord>>;

    /// Lists every material owned by `department`, ordered by level then
    /// creation time.
    fn by_department(&self, department: &DepartmentId) -> Result<Vec<MaterialRecord>>;
}

/// In-process catalog backed by a hash map.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    materials: RwLock<HashMap<MaterialId, MaterialRecord>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored materials.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<MaterialId, MaterialRecord>>> {
        self.materials
            .read()
            .map_err(|_| GateError::Storage("lock poisoned".to_string()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<MaterialId, MaterialRecord>>> {
        self.materials
            .write()
            .map_err(|_| GateError::Storage("lock poisoned".to_string()))
    }
}

impl Catalog for InMemoryCatalog {
    fn get(&self, id: &MaterialId) -> Result<Option<MaterialRecord>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn insert(&self, record: MaterialRecord) -> Result<()> {
        self.write()?.insert(record.id.clone(), record);
        Ok(())
    }

    fn remove(&self, id: &MaterialId) -> Result<Option<MaterialRecord>> {
        Ok(self.write()?.remove(id))
    }

    fn by_department(&self, department: &DepartmentId) -> Result<Vec<MaterialRecord>> {
        let mut found: Vec<MaterialRecord> = self
            .read()?
            .values()
            .filter(|record| record.department == *department)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            (a.level, a.created_at, &a.id).cmp(&(b.level, b.created_at, &b.id))
        });
        Ok(found)
    }
}
