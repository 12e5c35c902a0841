use super::common::*;
use crate::vendors::derivation::{
    assess_compliance, business_metrics, classify_urgency, derive_view, resolve_actions,
    score_risk, ActionContext, ComplianceLevel, RiskFactorKind, UrgencyLevel, VendorAction,
};
use crate::vendors::domain::{VendorAddress, VerificationStatus};

#[test]
fn urgency_tiers_follow_days_waiting() {
    let expectations = [
        (0, UrgencyLevel::Low),
        (2, UrgencyLevel::Low),
        (3, UrgencyLevel::Medium),
        (6, UrgencyLevel::Medium),
        (7, UrgencyLevel::High),
        (13, UrgencyLevel::High),
        (14, UrgencyLevel::Critical),
        (30, UrgencyLevel::Critical),
    ];

    for (days, expected) in expectations {
        let level = classify_urgency(Some(days_ago(days)), VerificationStatus::Pending, now());
        assert_eq!(level, expected, "{days} day(s) waiting");
    }
}

#[test]
fn urgency_is_none_unless_pending() {
    for days in [0, 5, 10, 40] {
        for status in [VerificationStatus::Approved, VerificationStatus::Rejected] {
            assert_eq!(
                classify_urgency(Some(days_ago(days)), status, now()),
                UrgencyLevel::None
            );
        }
    }
}

#[test]
fn partial_days_round_down_and_future_dates_fall_through_to_low() {
    let almost_three_days = now() - chrono::Duration::hours(71);
    assert_eq!(
        classify_urgency(Some(almost_three_days), VerificationStatus::Pending, now()),
        UrgencyLevel::Low
    );

    let future = now() + chrono::Duration::days(5);
    assert_eq!(
        classify_urgency(Some(future), VerificationStatus::Pending, now()),
        UrgencyLevel::Low
    );
    assert_eq!(
        classify_urgency(None, VerificationStatus::Pending, now()),
        UrgencyLevel::Low
    );
}

#[test]
fn complete_vendor_carries_no_risk() {
    let assessment = score_risk(&complete_vendor("v-1"), now());
    assert_eq!(assessment.score, 0);
    assert!(assessment.factors.is_empty());
}

#[test]
fn risk_weights_are_summed() {
    let mut record = complete_vendor("v-1");
    record.business_license = None;
    record.verification_status = Some(VerificationStatus::Pending);
    record.last_active_at = None;
    record.total_listings = Some(0);

    let assessment = score_risk(&record, now());

    assert_eq!(assessment.raw_score, 95);
    assert_eq!(assessment.score, 95);
    let kinds: Vec<_> = assessment.factors.iter().map(|f| f.factor).collect();
    assert_eq!(
        kinds,
        vec![
            RiskFactorKind::MissingBusinessLicense,
            RiskFactorKind::PendingVerification,
            RiskFactorKind::NoRecordedActivity,
            RiskFactorKind::NoListings,
        ]
    );
}

#[test]
fn inactivity_penalties_stack_past_thirty_days() {
    let mut record = complete_vendor("v-1");

    record.last_active_at = Some(days_ago(10));
    assert_eq!(score_risk(&record, now()).score, 15);

    record.last_active_at = Some(days_ago(45));
    assert_eq!(score_risk(&record, now()).score, 40);

    record.last_active_at = Some(days_ago(7));
    assert_eq!(score_risk(&record, now()).score, 0);
}

#[test]
fn rejected_vendor_with_gaps_is_clamped_to_one_hundred() {
    let mut record = sparse_pending_vendor("v-1");
    record.verification_status = Some(VerificationStatus::Rejected);

    let assessment = score_risk(&record, now());
    assert!(assessment.raw_score > 100);
    assert_eq!(assessment.score, 100);
}

#[test]
fn risk_score_stays_within_bounds() {
    let mut records = vec![complete_vendor("a"), sparse_pending_vendor("b")];
    let mut rejected = sparse_pending_vendor("c");
    rejected.verification_status = Some(VerificationStatus::Rejected);
    rejected.last_active_at = Some(days_ago(400));
    records.push(rejected);
    records.push(crate::vendors::domain::VendorRecord::default());

    for record in &records {
        let score = score_risk(record, now()).score;
        assert!(score <= 100, "score {score} out of range");
    }
}

#[test]
fn compliance_status_tracks_issue_count() {
    let compliant = assess_compliance(&complete_vendor("v-1"), now());
    assert_eq!(compliant.status, ComplianceLevel::Compliant);
    assert!(compliant.issues.is_empty());
    assert_eq!(compliant.last_checked, now());

    let mut minor = complete_vendor("v-2");
    minor.tax_id = None;
    minor.bank_account_verified = Some(false);
    let minor = assess_compliance(&minor, now());
    assert_eq!(minor.issues.len(), 2);
    assert_eq!(minor.status, ComplianceLevel::MinorIssues);

    let mut major = complete_vendor("v-3");
    major.tax_id = None;
    major.bank_account_verified = None;
    major.business_license = None;
    let major = assess_compliance(&major, now());
    assert_eq!(major.issues.len(), 3);
    assert_eq!(major.status, ComplianceLevel::MajorIssues);
    assert_eq!(major.issues[0], "Missing business license");
    assert_eq!(major.issues[1], "Missing tax ID");
}

#[test]
fn compliance_rating_rule_requires_enough_ratings() {
    let mut record = complete_vendor("v-1");
    record.average_rating = Some(3.2);
    record.total_ratings = Some(10);
    assert!(assess_compliance(&record, now()).issues.is_empty());

    record.total_ratings = Some(11);
    let status = assess_compliance(&record, now());
    assert_eq!(status.issues.len(), 1);
    assert!(status.issues[0].contains("rating"));

    record.dispute_rate = Some(0.06);
    let status = assess_compliance(&record, now());
    assert_eq!(status.issues.len(), 2);
    assert!(status.issues[1].contains("Dispute rate"));
}

#[test]
fn short_description_and_blank_street_are_issues() {
    let mut record = complete_vendor("v-1");
    record.business_description = Some("Fresh eggs.".to_string());
    record.address = Some(VendorAddress {
        street: Some("   ".to_string()),
        ..VendorAddress::default()
    });

    let status = assess_compliance(&record, now());
    assert_eq!(status.issues.len(), 2);
    assert_eq!(status.status, ComplianceLevel::MinorIssues);
}

#[test]
fn metrics_are_zero_guarded() {
    let metrics = business_metrics(&complete_vendor("v-1"));
    assert_eq!(metrics.conversion_rate, 5.0);
    assert_eq!(metrics.average_order_value, 45.0);
    assert_eq!(metrics.listings_performance, 3.33);
    assert_eq!(metrics.customer_retention, 30.0);
    assert_eq!(metrics.monthly_growth, 8.5);

    let empty = business_metrics(&sparse_pending_vendor("v-2"));
    assert_eq!(empty.conversion_rate, 0.0);
    assert_eq!(empty.average_order_value, 0.0);
    assert_eq!(empty.listings_performance, 0.0);
    assert_eq!(empty.customer_retention, 0.0);
}

#[test]
fn actions_for_healthy_active_vendor() {
    let view = derive_view(&complete_vendor("v-1"), now());
    assert_eq!(
        view.available_actions,
        vec![
            VendorAction::ViewDetails,
            VendorAction::EditProfile,
            VendorAction::ViewListings,
            VendorAction::ViewOrders,
            VendorAction::Deactivate,
            VendorAction::ViewAnalytics,
            VendorAction::ExportData,
            VendorAction::SendMessage,
            VendorAction::SendNotification,
            VendorAction::Suspend,
            VendorAction::SafeDelete,
        ]
    );
}

#[test]
fn actions_follow_verification_risk_and_compliance() {
    let ctx = ActionContext {
        verification_status: VerificationStatus::Pending,
        is_active: false,
        total_listings: 0,
        risk_score: 71,
        compliance: ComplianceLevel::MajorIssues,
    };
    let actions = resolve_actions(&ctx);

    for expected in [
        VendorAction::ApproveVerification,
        VendorAction::RejectVerification,
        VendorAction::RequestDocuments,
        VendorAction::Activate,
        VendorAction::FlagForReview,
        VendorAction::ScheduleAudit,
        VendorAction::RequestComplianceUpdate,
    ] {
        assert!(actions.contains(&expected), "missing {expected:?}");
    }
    assert!(!actions.contains(&VendorAction::ViewAnalytics));
    assert!(!actions.contains(&VendorAction::ReconsiderVerification));
    assert_eq!(actions.last(), Some(&VendorAction::SafeDelete));

    let rejected = resolve_actions(&ActionContext {
        verification_status: VerificationStatus::Rejected,
        risk_score: 70,
        ..ctx
    });
    assert!(rejected.contains(&VendorAction::ReconsiderVerification));
    assert!(!rejected.contains(&VendorAction::ApproveVerification));
    assert!(!rejected.contains(&VendorAction::FlagForReview));
}

#[test]
fn action_resolution_is_deterministic() {
    let ctx = ActionContext {
        verification_status: VerificationStatus::Approved,
        is_active: true,
        total_listings: 3,
        risk_score: 90,
        compliance: ComplianceLevel::MinorIssues,
    };

    let first = resolve_actions(&ctx);
    let second = resolve_actions(&ctx);
    assert_eq!(first, second);

    let mut deduped = first.clone();
    deduped.dedup();
    assert_eq!(deduped.len(), first.len());
}

#[test]
fn sparse_pending_vendor_end_to_end() {
    let view = derive_view(&sparse_pending_vendor("v-sparse"), now());

    assert_eq!(view.urgency_level, UrgencyLevel::High);
    assert_eq!(view.days_waiting, Some(10));
    assert!(view.risk_score >= 85);
    assert_eq!(view.compliance_status.status, ComplianceLevel::MajorIssues);
    assert!(view
        .available_actions
        .contains(&VendorAction::ApproveVerification));
    assert_eq!(view.profile.last_active, "Never");
}

#[test]
fn view_model_serializes_camel_case_fields() {
    let view = derive_view(&pending_vendor("v-1", 4), now());
    let json = serde_json::to_value(&view).expect("serialize view");

    assert_eq!(json["id"], "v-1");
    assert_eq!(json["urgencyLevel"], "medium");
    assert_eq!(json["riskScore"], 20);
    assert_eq!(json["complianceStatus"]["status"], "compliant");
    assert_eq!(json["businessMetrics"]["conversionRate"], 5.0);
    assert_eq!(json["availableActions"][4], "approve_verification");
    assert_eq!(json["ownerEmail"], "dana@prairieroot.example");
}
