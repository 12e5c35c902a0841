use crate::infra::read_vendor_export;
use chrono::{DateTime, Utc};
use clap::Args;
use marketplace_admin::error::AppError;
use marketplace_admin::vendors::{
    summarize, DirectorySummary, InMemoryVendorRepository, VendorDirectoryService, VendorQuery,
    VendorSort, VendorViewModel,
};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON export of vendor records (bare array or `{ "data": [...] }`)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Evaluation instant in RFC 3339 form (defaults to now)
    #[arg(long, value_parser = crate::infra::parse_instant)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Print the resolved admin actions beneath each vendor
    #[arg(long)]
    pub(crate) show_actions: bool,
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        input,
        as_of,
        show_actions,
    } = args;

    let now = as_of.unwrap_or_else(Utc::now);
    let records = read_vendor_export(&input)?;
    let directory = VendorDirectoryService::new(Arc::new(InMemoryVendorRepository::default()));
    directory.import(records)?;

    let views = directory.list(
        &VendorQuery {
            sort: Some(VendorSort::Urgency),
            ..VendorQuery::default()
        },
        now,
    )?;
    let summary = summarize(&views);

    print!("{}", render_assessment(&views, &summary, now, show_actions));
    Ok(())
}

pub(crate) fn render_assessment(
    views: &[VendorViewModel],
    summary: &DirectorySummary,
    now: DateTime<Utc>,
    show_actions: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Vendor assessment as of {}", now.format("%Y-%m-%d %H:%M UTC"));

    for view in views {
        let waiting = view
            .days_waiting
            .map(|days| format!(" | waiting {days}d"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "- {} ({}) | {} | urgency {}{} | risk {}{} | {}",
            view.profile.business_name,
            view.profile.id,
            view.profile.verification_label,
            view.urgency_level.label(),
            waiting,
            view.risk_score,
            if view.is_high_risk() { " HIGH" } else { "" },
            view.compliance_status.status.label(),
        );
        for issue in &view.compliance_status.issues {
            let _ = writeln!(out, "    ! {issue}");
        }
        if show_actions {
            let actions: Vec<&str> = view
                .available_actions
                .iter()
                .map(|action| action.as_str())
                .collect();
            let _ = writeln!(out, "    actions: {}", actions.join(", "));
        }
    }

    let _ = writeln!(
        out,
        "\n{} vendors | {} active | {} suspended | {} high risk | average risk {:.1}",
        summary.total,
        summary.active,
        summary.suspended,
        summary.high_risk,
        summary.average_risk_score
    );
    for entry in &summary.urgency {
        if entry.count > 0 {
            let _ = writeln!(out, "  {}: {}", entry.label, entry.count);
        }
    }
    out
}
