//! Admin vendor management: directory, verification workflow, and derived risk insights.

pub mod analytics;
pub mod derivation;
pub mod domain;
pub mod export;
pub mod normalizer;
pub mod query;
pub mod repository;
pub mod router;
pub mod service;
pub mod verification;

#[cfg(test)]
mod tests;

pub use analytics::{summarize, DirectorySummary};
pub use derivation::{
    derive_view, BusinessMetrics, ComplianceLevel, ComplianceStatus, RiskAssessment, UrgencyLevel,
    VendorAction, VendorViewModel,
};
pub use domain::{VendorAddress, VendorId, VendorOwner, VendorRecord, VerificationStatus};
pub use query::{VendorQuery, VendorSort};
pub use repository::{InMemoryVendorRepository, RepositoryError, VendorRepository};
pub use router::vendor_router;
pub use service::{StatusChange, VendorDirectoryService, VendorServiceError};
pub use verification::{VerificationDecision, VerificationError};
