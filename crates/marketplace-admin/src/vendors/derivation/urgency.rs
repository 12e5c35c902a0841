use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::domain::VerificationStatus;

/// Admin-facing priority tier for vendors waiting on verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Critical,
            Self::High,
            Self::Medium,
            Self::Low,
            Self::None,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

const CRITICAL_AFTER_DAYS: i64 = 14;
const HIGH_AFTER_DAYS: i64 = 7;
const MEDIUM_AFTER_DAYS: i64 = 3;

/// Whole days between `created_at` and `now`, negative when `created_at` lies in the future.
pub fn days_waiting(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    created_at
        .map(|created| (now - created).num_seconds().div_euclid(86_400))
        .unwrap_or(0)
}

pub fn classify_urgency(
    created_at: Option<DateTime<Utc>>,
    status: VerificationStatus,
    now: DateTime<Utc>,
) -> UrgencyLevel {
    if status != VerificationStatus::Pending {
        return UrgencyLevel::None;
    }

    urgency_for_days(days_waiting(created_at, now))
}

pub(crate) fn urgency_for_days(days: i64) -> UrgencyLevel {
    if days >= CRITICAL_AFTER_DAYS {
        UrgencyLevel::Critical
    } else if days >= HIGH_AFTER_DAYS {
        UrgencyLevel::High
    } else if days >= MEDIUM_AFTER_DAYS {
        UrgencyLevel::Medium
    } else {
        UrgencyLevel::Low
    }
}
