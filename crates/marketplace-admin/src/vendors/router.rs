use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{VendorId, VendorRecord};
use super::query::VendorQuery;
use super::repository::VendorRepository;
use super::service::{StatusChange, VendorDirectoryService};
use super::verification::VerificationDecision;
use crate::envelope::ApiEnvelope;
use crate::error::AppError;

/// Evaluation instant override; defaults to the time the request is handled.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct AsOf {
    pub(crate) as_of: Option<DateTime<Utc>>,
}

impl AsOf {
    fn resolve(&self) -> DateTime<Utc> {
        self.as_of.unwrap_or_else(Utc::now)
    }
}

/// Router builder exposing the admin vendor directory.
pub fn vendor_router<R>(service: Arc<VendorDirectoryService<R>>) -> Router
where
    R: VendorRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/admin/vendors",
            get(list_handler::<R>).post(register_handler::<R>),
        )
        .route("/api/v1/admin/vendors/summary", get(summary_handler::<R>))
        .route("/api/v1/admin/vendors/export", get(export_handler::<R>))
        .route(
            "/api/v1/admin/vendors/:vendor_id",
            get(detail_handler::<R>).delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/admin/vendors/:vendor_id/verification",
            post(verification_handler::<R>),
        )
        .route(
            "/api/v1/admin/vendors/:vendor_id/status",
            post(status_handler::<R>),
        )
        .with_state(service)
}

type Shared<R> = State<Arc<VendorDirectoryService<R>>>;

/// Body extraction whose failures render through `AppError` like every other error.
type JsonBody<T> = Result<Json<T>, JsonRejection>;

fn ok<T: serde::Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(ApiEnvelope::new(data))).into_response()
}

pub(crate) async fn list_handler<R>(
    State(service): Shared<R>,
    Query(query): Query<VendorQuery>,
    Query(as_of): Query<AsOf>,
) -> Result<Response, AppError>
where
    R: VendorRepository + 'static,
{
    let views = service.list(&query, as_of.resolve())?;
    Ok(ok(StatusCode::OK, views))
}

pub(crate) async fn register_handler<R>(
    State(service): Shared<R>,
    body: JsonBody<VendorRecord>,
) -> Result<Response, AppError>
where
    R: VendorRepository + 'static,
{
    let Json(record) = body?;
    let stored = service.register(record)?;
    let view = service.get(&stored.id, Utc::now())?;
    Ok(ok(StatusCode::CREATED, view))
}

pub(crate) async fn summary_handler<R>(
    State(service): Shared<R>,
    Query(as_of): Query<AsOf>,
) -> Result<Response, AppError>
where
    R: VendorRepository + 'static,
{
    let summary = service.summary(as_of.resolve())?;
    Ok(ok(StatusCode::OK, summary))
}

pub(crate) async fn export_handler<R>(
    State(service): Shared<R>,
    Query(query): Query<VendorQuery>,
    Query(as_of): Query<AsOf>,
) -> Result<Response, AppError>
where
    R: VendorRepository + 'static,
{
    let body = service.export_csv(&query, as_of.resolve())?;
    let content_type = mime::TEXT_CSV_UTF_8.to_string();
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.as_str()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"vendors.csv\"",
            ),
        ],
        body,
    )
        .into_response())
}

pub(crate) async fn detail_handler<R>(
    State(service): Shared<R>,
    Path(vendor_id): Path<String>,
    Query(as_of): Query<AsOf>,
) -> Result<Response, AppError>
where
    R: VendorRepository + 'static,
{
    let view = service.get(&VendorId(vendor_id), as_of.resolve())?;
    Ok(ok(StatusCode::OK, view))
}

pub(crate) async fn verification_handler<R>(
    State(service): Shared<R>,
    Path(vendor_id): Path<String>,
    body: JsonBody<VerificationDecision>,
) -> Result<Response, AppError>
where
    R: VendorRepository + 'static,
{
    let Json(decision) = body?;
    let view = service.apply_verification(&VendorId(vendor_id), decision, Utc::now())?;
    Ok(ok(StatusCode::OK, view))
}

pub(crate) async fn status_handler<R>(
    State(service): Shared<R>,
    Path(vendor_id): Path<String>,
    body: JsonBody<StatusChange>,
) -> Result<Response, AppError>
where
    R: VendorRepository + 'static,
{
    let Json(change) = body?;
    let view = service.change_status(&VendorId(vendor_id), change, Utc::now())?;
    Ok(ok(StatusCode::OK, view))
}

pub(crate) async fn delete_handler<R>(
    State(service): Shared<R>,
    Path(vendor_id): Path<String>,
) -> Result<Response, AppError>
where
    R: VendorRepository + 'static,
{
    let id = VendorId(vendor_id);
    service.safe_delete(&id, Utc::now())?;
    Ok(ok(StatusCode::OK, json!({ "id": id, "deleted": true })))
}
