use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{VendorRecord, VerificationStatus};

/// Admin-triggered verification decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum VerificationDecision {
    Approve,
    Reject { reason: String },
    Reconsider,
}

impl VerificationDecision {
    pub fn target(&self) -> VerificationStatus {
        match self {
            Self::Approve => VerificationStatus::Approved,
            Self::Reject { .. } => VerificationStatus::Rejected,
            Self::Reconsider => VerificationStatus::Pending,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject { .. } => "reject",
            Self::Reconsider => "reconsider",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VerificationError {
    #[error("cannot {action} a vendor whose verification is {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
    #[error("a rejection reason is required")]
    MissingReason,
}

/// Validates a decision against the current status without touching the record.
pub fn next_status(
    current: VerificationStatus,
    decision: &VerificationDecision,
) -> Result<VerificationStatus, VerificationError> {
    let allowed = matches!(
        (current, decision),
        (VerificationStatus::Pending, VerificationDecision::Approve)
            | (VerificationStatus::Pending, VerificationDecision::Reject { .. })
            | (VerificationStatus::Rejected, VerificationDecision::Reconsider)
    );

    if !allowed {
        return Err(VerificationError::InvalidTransition {
            from: current.as_str(),
            action: decision.name(),
        });
    }

    if let VerificationDecision::Reject { reason } = decision {
        if reason.trim().is_empty() {
            return Err(VerificationError::MissingReason);
        }
    }

    Ok(decision.target())
}

/// Applies a validated decision, stamping approval time and rejection reason.
pub fn apply_decision(
    record: &mut VendorRecord,
    decision: &VerificationDecision,
    now: DateTime<Utc>,
) -> Result<VerificationStatus, VerificationError> {
    let next = next_status(record.verification_status(), decision)?;
    record.verification_status = Some(next);

    match decision {
        VerificationDecision::Approve => {
            record.verified_at = Some(now);
            record.rejection_reason = None;
        }
        VerificationDecision::Reject { reason } => {
            record.verified_at = None;
            record.rejection_reason = Some(reason.trim().to_string());
        }
        VerificationDecision::Reconsider => {
            record.rejection_reason = None;
        }
    }

    Ok(next)
}
