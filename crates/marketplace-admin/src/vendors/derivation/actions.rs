use serde::{Deserialize, Serialize};

use super::super::domain::VerificationStatus;
use super::compliance::ComplianceLevel;
use super::risk::HIGH_RISK_THRESHOLD;

/// Admin actions the console may offer for a vendor. The backend re-validates each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorAction {
    ViewDetails,
    EditProfile,
    ViewListings,
    ViewOrders,
    ApproveVerification,
    RejectVerification,
    RequestDocuments,
    ReconsiderVerification,
    Deactivate,
    Activate,
    ViewAnalytics,
    ExportData,
    SendMessage,
    SendNotification,
    FlagForReview,
    ScheduleAudit,
    RequestComplianceUpdate,
    Suspend,
    SafeDelete,
}

impl VendorAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewDetails => "view_details",
            Self::EditProfile => "edit_profile",
            Self::ViewListings => "view_listings",
            Self::ViewOrders => "view_orders",
            Self::ApproveVerification => "approve_verification",
            Self::RejectVerification => "reject_verification",
            Self::RequestDocuments => "request_documents",
            Self::ReconsiderVerification => "reconsider_verification",
            Self::Deactivate => "deactivate",
            Self::Activate => "activate",
            Self::ViewAnalytics => "view_analytics",
            Self::ExportData => "export_data",
            Self::SendMessage => "send_message",
            Self::SendNotification => "send_notification",
            Self::FlagForReview => "flag_for_review",
            Self::ScheduleAudit => "schedule_audit",
            Self::RequestComplianceUpdate => "request_compliance_update",
            Self::Suspend => "suspend",
            Self::SafeDelete => "safe_delete",
        }
    }
}

/// Inputs the action table is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionContext {
    pub verification_status: VerificationStatus,
    pub is_active: bool,
    pub total_listings: u32,
    pub risk_score: u8,
    pub compliance: ComplianceLevel,
}

type ActionRule = (fn(&ActionContext) -> bool, VendorAction);

fn always(_: &ActionContext) -> bool {
    true
}

fn pending(ctx: &ActionContext) -> bool {
    ctx.verification_status == VerificationStatus::Pending
}

fn rejected(ctx: &ActionContext) -> bool {
    ctx.verification_status == VerificationStatus::Rejected
}

fn active(ctx: &ActionContext) -> bool {
    ctx.is_active
}

fn inactive(ctx: &ActionContext) -> bool {
    !ctx.is_active
}

fn has_listings(ctx: &ActionContext) -> bool {
    ctx.total_listings > 0
}

fn high_risk(ctx: &ActionContext) -> bool {
    ctx.risk_score > HIGH_RISK_THRESHOLD
}

fn non_compliant(ctx: &ActionContext) -> bool {
    ctx.compliance != ComplianceLevel::Compliant
}

const ACTION_TABLE: &[ActionRule] = &[
    (always, VendorAction::ViewDetails),
    (always, VendorAction::EditProfile),
    (always, VendorAction::ViewListings),
    (always, VendorAction::ViewOrders),
    (pending, VendorAction::ApproveVerification),
    (pending, VendorAction::RejectVerification),
    (pending, VendorAction::RequestDocuments),
    (rejected, VendorAction::ReconsiderVerification),
    (active, VendorAction::Deactivate),
    (inactive, VendorAction::Activate),
    (has_listings, VendorAction::ViewAnalytics),
    (has_listings, VendorAction::ExportData),
    (always, VendorAction::SendMessage),
    (always, VendorAction::SendNotification),
    (high_risk, VendorAction::FlagForReview),
    (high_risk, VendorAction::ScheduleAudit),
    (non_compliant, VendorAction::RequestComplianceUpdate),
    (always, VendorAction::Suspend),
    (always, VendorAction::SafeDelete),
];

/// Evaluates the action table once, in table order. Each action appears at most once.
pub fn resolve_actions(ctx: &ActionContext) -> Vec<VendorAction> {
    ACTION_TABLE
        .iter()
        .filter(|(applies, _)| applies(ctx))
        .map(|(_, action)| *action)
        .collect()
}
