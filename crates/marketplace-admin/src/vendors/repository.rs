use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{VendorId, VendorRecord};

/// Storage abstraction so the directory service can be exercised in isolation.
pub trait VendorRepository: Send + Sync {
    fn insert(&self, record: VendorRecord) -> Result<VendorRecord, RepositoryError>;
    /// Runs `apply` against a copy of the stored record and commits it only when `apply`
    /// succeeds. Implementations hold exclusive access for the whole call, so checks made
    /// inside `apply` cannot go stale before the write.
    fn modify<T, E, F>(&self, id: &VendorId, apply: F) -> Result<T, E>
    where
        F: FnOnce(&mut VendorRecord) -> Result<T, E>,
        E: From<RepositoryError>;
    fn fetch(&self, id: &VendorId) -> Result<Option<VendorRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<VendorRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local repository used by the API server and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryVendorRepository {
    records: Arc<Mutex<HashMap<VendorId, VendorRecord>>>,
}

impl InMemoryVendorRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<VendorId, VendorRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl VendorRepository for InMemoryVendorRepository {
    fn insert(&self, record: VendorRecord) -> Result<VendorRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn modify<T, E, F>(&self, id: &VendorId, apply: F) -> Result<T, E>
    where
        F: FnOnce(&mut VendorRecord) -> Result<T, E>,
        E: From<RepositoryError>,
    {
        let mut guard = self.lock()?;
        let stored = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        let mut draft = stored.clone();
        let outcome = apply(&mut draft)?;
        *stored = draft;
        Ok(outcome)
    }

    fn fetch(&self, id: &VendorId) -> Result<Option<VendorRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<VendorRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.values().cloned().collect())
    }
}
