use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::vendors::domain::{VendorAddress, VendorId, VendorOwner, VendorRecord, VerificationStatus};
use crate::vendors::repository::{InMemoryVendorRepository, RepositoryError, VendorRepository};
use crate::vendors::{vendor_router, VendorDirectoryService};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0)
        .single()
        .expect("valid evaluation instant")
}

pub(super) fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

/// Approved, fully documented, recently active vendor that trips no risk or compliance rule.
pub(super) fn complete_vendor(id: &str) -> VendorRecord {
    VendorRecord {
        id: VendorId(id.to_string()),
        business_name: Some("Prairie Root Farms".to_string()),
        business_type: Some("farm".to_string()),
        business_description: Some(
            "Family-run organic vegetable farm supplying restaurants across central Iowa."
                .to_string(),
        ),
        owner: Some(VendorOwner {
            name: Some("Dana Whitfield".to_string()),
            email: Some("Dana@PrairieRoot.example".to_string()),
            phone: Some("515-555-0142".to_string()),
        }),
        address: Some(VendorAddress {
            street: Some("4410 County Road 12".to_string()),
            city: Some("Ames".to_string()),
            state: Some("IA".to_string()),
            zip_code: Some("50010".to_string()),
        }),
        verification_status: Some(VerificationStatus::Approved),
        created_at: Some(days_ago(120)),
        is_active: Some(true),
        last_active_at: Some(days_ago(1)),
        business_license: Some("IA-AG-20931".to_string()),
        business_license_verified: Some(true),
        tax_id: Some("42-1234567".to_string()),
        bank_account_verified: Some(true),
        owner_identification: Some("dl-ia-88120".to_string()),
        owner_identification_verified: Some(true),
        total_listings: Some(12),
        total_orders: Some(40),
        total_revenue: Some(1800.0),
        average_rating: Some(4.6),
        total_ratings: Some(25),
        dispute_rate: Some(0.01),
        monthly_growth_rate: Some(8.5),
        returning_customers: Some(9),
        total_customers: Some(30),
        total_views: Some(800),
        ..VendorRecord::default()
    }
}

pub(super) fn pending_vendor(id: &str, days_waiting: i64) -> VendorRecord {
    VendorRecord {
        verification_status: Some(VerificationStatus::Pending),
        created_at: Some(days_ago(days_waiting)),
        ..complete_vendor(id)
    }
}

/// Sparse pending vendor: ten days waiting, no license, no listings, no rating.
pub(super) fn sparse_pending_vendor(id: &str) -> VendorRecord {
    VendorRecord {
        id: VendorId(id.to_string()),
        business_name: Some("Late Frost Orchard".to_string()),
        verification_status: Some(VerificationStatus::Pending),
        created_at: Some(days_ago(10)),
        business_license: None,
        total_listings: Some(0),
        average_rating: Some(0.0),
        ..VendorRecord::default()
    }
}

pub(super) fn build_service() -> (
    VendorDirectoryService<InMemoryVendorRepository>,
    Arc<InMemoryVendorRepository>,
) {
    let repository = Arc::new(InMemoryVendorRepository::default());
    let service = VendorDirectoryService::new(repository.clone());
    (service, repository)
}

pub(super) fn seeded_service() -> VendorDirectoryService<InMemoryVendorRepository> {
    let (service, _) = build_service();
    service
        .import(vec![
            complete_vendor("v-approved"),
            pending_vendor("v-pending-old", 20),
            pending_vendor("v-pending-new", 1),
            sparse_pending_vendor("v-sparse"),
        ])
        .expect("seed directory");
    service
}

pub(super) struct UnavailableRepository;

impl VendorRepository for UnavailableRepository {
    fn insert(&self, _record: VendorRecord) -> Result<VendorRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn modify<T, E, F>(&self, _id: &VendorId, _apply: F) -> Result<T, E>
    where
        F: FnOnce(&mut VendorRecord) -> Result<T, E>,
        E: From<RepositoryError>,
    {
        Err(RepositoryError::Unavailable("database offline".to_string()).into())
    }

    fn fetch(&self, _id: &VendorId) -> Result<Option<VendorRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<VendorRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn router_with_service(
    service: VendorDirectoryService<InMemoryVendorRepository>,
) -> axum::Router {
    vendor_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
