use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use huizen_tracker::config::AppConfig;
use huizen_tracker::error::AppError;
use huizen_tracker::listings::{HouseService, RestHouseStore};
use huizen_tracker::telemetry;

use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_house_routes;

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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(RestHouseStore::new(&config.store)?);
    let service = Arc::new(HouseService::new(store));

    let app = with_house_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "huizen tracker dashboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}
