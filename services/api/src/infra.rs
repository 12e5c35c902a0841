use chrono::{DateTime, Utc};
use marketplace_admin::envelope::ApiEnvelope;
use marketplace_admin::error::AppError;
use marketplace_admin::vendors::{VendorDirectoryService, VendorRecord, VendorRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Readiness,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReadinessStatus {
    Seeding,
    Ready,
    SeedFailed,
}

impl ReadinessStatus {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Seeding => "seeding",
            Self::Ready => "ready",
            Self::SeedFailed => "seed_failed",
        }
    }
}

/// Shared startup state; starts out seeding and moves once to ready or failed.
#[derive(Debug, Clone, Default)]
pub(crate) struct Readiness(Arc<AtomicU8>);

impl Readiness {
    const SEEDING: u8 = 0;
    const READY: u8 = 1;
    const FAILED: u8 = 2;

    pub(crate) fn status(&self) -> ReadinessStatus {
        match self.0.load(Ordering::Acquire) {
            Self::READY => ReadinessStatus::Ready,
            Self::FAILED => ReadinessStatus::SeedFailed,
            _ => ReadinessStatus::Seeding,
        }
    }

    pub(crate) fn mark_ready(&self) {
        self.0.store(Self::READY, Ordering::Release);
    }

    pub(crate) fn mark_failed(&self) {
        self.0.store(Self::FAILED, Ordering::Release);
    }
}

/// Vendor exports arrive either as a bare array or wrapped in the backend's `data` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum VendorExport {
    Enveloped(ApiEnvelope<Vec<VendorRecord>>),
    Bare(Vec<VendorRecord>),
}

pub(crate) fn parse_vendor_export(raw: &str) -> Result<Vec<VendorRecord>, serde_json::Error> {
    let export: VendorExport = serde_json::from_str(raw)?;
    Ok(match export {
        VendorExport::Enveloped(envelope) => envelope.into_data(),
        VendorExport::Bare(records) => records,
    })
}

pub(crate) fn read_vendor_export(path: &Path) -> Result<Vec<VendorRecord>, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(parse_vendor_export(&raw)?)
}

pub(crate) fn seed_directory<R>(
    directory: &VendorDirectoryService<R>,
    path: &Path,
) -> Result<usize, AppError>
where
    R: VendorRepository + 'static,
{
    let records = read_vendor_export(path)?;
    Ok(directory.import(records)?)
}

/// Imports the seed export off the async runtime and records the outcome in `readiness`.
pub(crate) fn spawn_seeding<R>(
    directory: Arc<VendorDirectoryService<R>>,
    seed_path: Option<PathBuf>,
    readiness: Readiness,
) -> JoinHandle<()>
where
    R: VendorRepository + 'static,
{
    tokio::task::spawn_blocking(move || {
        let Some(path) = seed_path else {
            readiness.mark_ready();
            return;
        };
        match seed_directory(&directory, &path) {
            Ok(imported) => {
                info!(path = %path.display(), imported, "vendor directory seeded");
                readiness.mark_ready();
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "vendor directory seeding failed");
                readiness.mark_failed();
            }
        }
    })
}

pub(crate) fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}
