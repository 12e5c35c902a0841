//! End-to-end scenarios over the public directory facade, starting from backend JSON payloads.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;

use marketplace_admin::envelope::ApiEnvelope;
use marketplace_admin::vendors::{
    derive_view, ComplianceLevel, InMemoryVendorRepository, UrgencyLevel, VendorAction, VendorId,
    VendorDirectoryService, VendorQuery, VendorRecord, VendorSort, VerificationDecision,
    VerificationStatus,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 9, 30, 0)
        .single()
        .expect("valid instant")
}

fn backend_payload() -> serde_json::Value {
    json!({
        "data": [
            {
                "_id": "66a1f0c2",
                "businessName": "Hollow Creek Honey",
                "businessType": "apiary",
                "businessDescription": "Raw wildflower honey and beeswax goods harvested from forty hives in Story County.",
                "userId": { "name": "Ruth Okafor", "email": "ruth@hollowcreek.example", "phone": "515-555-0199" },
                "address": { "street": "88 Bee Line Rd", "city": "Nevada", "state": "IA", "zipCode": "50201" },
                "verificationStatus": "approved",
                "createdAt": (now() - Duration::days(200)).to_rfc3339(),
                "isActive": true,
                "lastActiveAt": (now() - Duration::hours(5)).to_rfc3339(),
                "businessLicense": "IA-AP-7781",
                "taxId": "42-9988776",
                "bankAccountVerified": true,
                "totalListings": 6,
                "totalOrders": 58,
                "totalRevenue": 2610.0,
                "averageRating": 4.8,
                "totalRatings": 31,
                "disputeRate": 0.0,
                "totalViews": 1450,
                "totalCustomers": 40,
                "returningCustomers": 22
            },
            {
                "_id": "66a1f0c3",
                "businessName": "North Fork Greens",
                "verificationStatus": "pending",
                "createdAt": (now() - Duration::days(10)).to_rfc3339(),
                "businessLicense": null,
                "totalListings": 0,
                "averageRating": 0
            },
            {
                "_id": "66a1f0c4",
                "businessName": "Old Mill Grains",
                "verificationStatus": "rejected",
                "createdAt": (now() - Duration::days(30)).to_rfc3339(),
                "lastActiveAt": (now() - Duration::days(40)).to_rfc3339(),
                "rejectionReason": "tax id mismatch"
            }
        ]
    })
}

fn load_records() -> Vec<VendorRecord> {
    let envelope: ApiEnvelope<Vec<VendorRecord>> =
        serde_json::from_value(backend_payload()).expect("payload deserializes");
    envelope.into_data()
}

fn seeded_service() -> VendorDirectoryService<InMemoryVendorRepository> {
    let service = VendorDirectoryService::new(Arc::new(InMemoryVendorRepository::default()));
    let imported = service.import(load_records()).expect("import succeeds");
    assert_eq!(imported, 3);
    service
}

#[test]
fn sparse_pending_vendor_is_flagged() {
    let records = load_records();
    let view = derive_view(&records[1], now());

    assert_eq!(view.urgency_level, UrgencyLevel::High);
    assert!(view.risk_score >= 85);
    assert_eq!(view.compliance_status.status, ComplianceLevel::MajorIssues);
    assert!(view.available_actions.contains(&VendorAction::FlagForReview));
    assert_eq!(view.profile.address, "Address not provided");
}

#[test]
fn healthy_vendor_view_is_clean() {
    let records = load_records();
    let view = derive_view(&records[0], now());

    assert_eq!(view.urgency_level, UrgencyLevel::None);
    assert_eq!(view.risk_score, 0);
    assert!(view.compliance_status.is_compliant());
    assert_eq!(view.profile.address, "88 Bee Line Rd, Nevada, IA 50201");
    assert_eq!(view.business_metrics.customer_retention, 55.0);
    assert_eq!(view.business_metrics.average_order_value, 45.0);
}

#[test]
fn admin_triage_flow() {
    let service = seeded_service();

    let queue = service
        .list(
            &VendorQuery {
                sort: Some(VendorSort::Risk),
                ..VendorQuery::default()
            },
            now(),
        )
        .expect("list directory");
    assert_eq!(queue[0].risk_score, 100);
    assert_eq!(queue.last().map(|view| view.risk_score), Some(0));

    let rejected = VendorId("66a1f0c4".to_string());
    let reopened = service
        .apply_verification(&rejected, VerificationDecision::Reconsider, now())
        .expect("reconsider rejected vendor");
    assert_eq!(
        reopened.profile.verification_status,
        VerificationStatus::Pending
    );
    assert_eq!(reopened.urgency_level, UrgencyLevel::Critical);

    let summary = service.summary(now()).expect("summary");
    assert_eq!(summary.verification_count(VerificationStatus::Pending), 2);
    assert_eq!(summary.verification_count(VerificationStatus::Rejected), 0);
}
