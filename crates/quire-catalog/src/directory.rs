//! Identity directory: resolves caller identities to subject snapshots.

use std::collections::HashMap;
use std::sync::RwLock;

use quire_abac::Subject;
use quire_types::UserId;

use crate::error::{GateError, Result};
use crate::records::UserRecord;

/// Registered users, keyed by id.
#[derive(Debug, Default)]
pub struct Directory {
    users: RwLock<HashMap<UserId, UserRecord>>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a user.
    pub fn register(&self, user: UserRecord) -> Result<()> {
        self.users
            .write()
            .map_err(|_| GateError::Storage("lock poisoned".to_string()))?
            .insert(user.id.clone(), user);
        Ok(())
    }

    /// Looks up a user record.
    pub fn user(&self, id: &UserId) -> Result<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .map_err(|_| GateError::Storage("lock poisoned".to_string()))?
            .get(id)
            .cloned())
    }

    /// Resolves a presented identity to a subject snapshot.
    ///
    /// A missing or blank identity, or one that names no registered user,
    /// is rejected as unauthenticated before any policy is consulted.
    pub fn authenticate(&self, presented: Option<&str>) -> Result<Subject> {
        let raw = presented
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| GateError::Unauthenticated("user id missing".to_string()))?;

        self.user(&UserId::new(raw))?
            .map(|user| user.subject())
            .ok_or_else(|| GateError::Unauthenticated(format!("invalid user id '{raw}'")))
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self
            .users
            .read()
            .map_err(|_| GateError::Storage("lock poisoned".to_string()))?
            .len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
