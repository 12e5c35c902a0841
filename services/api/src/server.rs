use crate::cli::ServeArgs;
use crate::infra::{spawn_seeding, AppState, Readiness};
use crate::routes::with_vendor_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use marketplace_admin::config::AppConfig;
use marketplace_admin::error::AppError;
use marketplace_admin::telemetry;
use marketplace_admin::vendors::{InMemoryVendorRepository, VendorDirectoryService};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness = Readiness::default();
    let app_state = AppState {
        readiness: readiness.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryVendorRepository::default());
    let directory = Arc::new(VendorDirectoryService::new(repository));

    let app = with_vendor_routes(directory.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(?config.environment, %addr, "marketplace admin service listening");

    // /ready answers "seeding" until the import settles.
    let _seeding = spawn_seeding(directory, config.directory.seed_path.clone(), readiness);

    axum::serve(listener, app).await?;
    Ok(())
}
