use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::analytics::{summarize, DirectorySummary};
use super::derivation::{derive_view, VendorViewModel};
use super::domain::{VendorId, VendorRecord};
use super::export::{vendors_to_csv, ExportError};
use super::query::VendorQuery;
use super::repository::{RepositoryError, VendorRepository};
use super::verification::{apply_decision, VerificationDecision, VerificationError};

/// Status changes an admin can make outside the verification workflow.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StatusChange {
    Activate,
    Deactivate,
    Suspend { reason: String },
    Reinstate,
}

/// Service composing the vendor repository and the derivation pipeline.
///
/// Raw records are the only stored state; every read derives a fresh view model.
pub struct VendorDirectoryService<R> {
    repository: Arc<R>,
}

impl<R> VendorDirectoryService<R>
where
    R: VendorRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Register a raw vendor record as received from the backend.
    pub fn register(&self, mut record: VendorRecord) -> Result<VendorRecord, VendorServiceError> {
        let trimmed = record.id.0.trim().to_string();
        if trimmed.is_empty() {
            return Err(VendorServiceError::MissingId);
        }
        record.id = VendorId(trimmed);

        let id = record.id.clone();
        match self.repository.insert(record) {
            Ok(stored) => {
                info!(vendor_id = %stored.id, "vendor registered");
                Ok(stored)
            }
            Err(RepositoryError::Conflict) => match self.repository.fetch(&id)? {
                Some(existing) if existing.is_deleted() => Err(VendorServiceError::Deleted(id)),
                _ => Err(RepositoryError::Conflict.into()),
            },
            Err(other) => Err(other.into()),
        }
    }

    /// Seed the directory, skipping records whose id is already present.
    pub fn import(&self, records: Vec<VendorRecord>) -> Result<usize, VendorServiceError> {
        let mut imported = 0;
        for record in records {
            match self.register(record) {
                Ok(_) => imported += 1,
                Err(VendorServiceError::Repository(RepositoryError::Conflict))
                | Err(VendorServiceError::Deleted(_)) => {}
                Err(VendorServiceError::MissingId) => warn!("skipping vendor without an id"),
                Err(other) => return Err(other),
            }
        }
        Ok(imported)
    }

    pub fn get(
        &self,
        id: &VendorId,
        now: DateTime<Utc>,
    ) -> Result<VendorViewModel, VendorServiceError> {
        let record = self.live_record(id)?;
        Ok(derive_view(&record, now))
    }

    pub fn list(
        &self,
        query: &VendorQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<VendorViewModel>, VendorServiceError> {
        let records = self.repository.list()?;
        Ok(query.apply(&records, now))
    }

    pub fn summary(&self, now: DateTime<Utc>) -> Result<DirectorySummary, VendorServiceError> {
        let views = self.list(&VendorQuery::default(), now)?;
        Ok(summarize(&views))
    }

    pub fn export_csv(
        &self,
        query: &VendorQuery,
        now: DateTime<Utc>,
    ) -> Result<String, VendorServiceError> {
        let views = self.list(query, now)?;
        Ok(vendors_to_csv(&views)?)
    }

    /// Move a vendor through the verification workflow.
    ///
    /// The transition is checked and written in one repository call, so two admins deciding
    /// on the same pending vendor cannot both succeed.
    pub fn apply_verification(
        &self,
        id: &VendorId,
        decision: VerificationDecision,
        now: DateTime<Utc>,
    ) -> Result<VendorViewModel, VendorServiceError> {
        let (record, previous, next) = self.modify_live(id, |record| {
            let previous = record.verification_status();
            let next = apply_decision(record, &decision, now)?;
            Ok((record.clone(), previous, next))
        })?;

        info!(
            vendor_id = %id,
            from = previous.as_str(),
            to = next.as_str(),
            "vendor verification updated"
        );
        Ok(derive_view(&record, now))
    }

    pub fn change_status(
        &self,
        id: &VendorId,
        change: StatusChange,
        now: DateTime<Utc>,
    ) -> Result<VendorViewModel, VendorServiceError> {
        let record = self.modify_live(id, |record| {
            match &change {
                StatusChange::Activate => {
                    if record.is_suspended() {
                        return Err(VendorServiceError::Suspended(id.clone()));
                    }
                    record.is_active = Some(true);
                }
                StatusChange::Deactivate => record.is_active = Some(false),
                StatusChange::Suspend { reason } => {
                    let reason = reason.trim();
                    if reason.is_empty() {
                        return Err(VendorServiceError::MissingReason);
                    }
                    record.is_suspended = Some(true);
                    record.is_active = Some(false);
                    record.suspension_reason = Some(reason.to_string());
                }
                StatusChange::Reinstate => {
                    if !record.is_suspended() {
                        return Err(VendorServiceError::NotSuspended(id.clone()));
                    }
                    record.is_suspended = Some(false);
                    record.suspension_reason = None;
                }
            }
            Ok(record.clone())
        })?;

        info!(vendor_id = %id, change = ?change, "vendor status changed");
        Ok(derive_view(&record, now))
    }

    /// Soft delete: the record is kept but hidden from every read.
    pub fn safe_delete(&self, id: &VendorId, now: DateTime<Utc>) -> Result<(), VendorServiceError> {
        self.modify_live(id, |record| {
            record.deleted_at = Some(now);
            record.is_active = Some(false);
            Ok(())
        })?;
        info!(vendor_id = %id, "vendor deleted");
        Ok(())
    }

    /// Atomic update of a record that has not been soft deleted.
    fn modify_live<T, F>(&self, id: &VendorId, apply: F) -> Result<T, VendorServiceError>
    where
        F: FnOnce(&mut VendorRecord) -> Result<T, VendorServiceError>,
    {
        self.repository.modify(id, |record| {
            if record.is_deleted() {
                return Err(RepositoryError::NotFound.into());
            }
            apply(record)
        })
    }

    fn live_record(&self, id: &VendorId) -> Result<VendorRecord, VendorServiceError> {
        self.repository
            .fetch(id)?
            .filter(|record| !record.is_deleted())
            .ok_or_else(|| RepositoryError::NotFound.into())
    }
}

/// Error raised by the vendor directory service.
#[derive(Debug, thiserror::Error)]
pub enum VendorServiceError {
    #[error("vendor record is missing an id")]
    MissingId,
    #[error("a reason is required")]
    MissingReason,
    #[error("vendor {0} is not suspended")]
    NotSuspended(VendorId),
    #[error("vendor {0} is suspended; reinstate it before activating")]
    Suspended(VendorId),
    #[error("vendor {0} was deleted and cannot be registered again")]
    Deleted(VendorId),
    #[error(transparent)]
    Verification(#[from] VerificationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
