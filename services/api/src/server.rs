use crate::cli::ServeArgs;
use crate::infra::{seeded_store, AppState};
use crate::routes::with_matching_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use foodbridge::config::AppConfig;
use foodbridge::error::AppError;
use foodbridge::matching::{MatchingService, ScoringPolicy, SystemClock};
use foodbridge::telemetry;
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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(seeded_store());
    let policy = ScoringPolicy::with_max_distance_km(config.matching.max_distance_km);
    let matching_service = Arc::new(
        MatchingService::new(store, Arc::new(SystemClock), policy).with_limits(
            config.matching.default_top_n,
            config.matching.emergency_limit,
        ),
    );

    let app = with_matching_routes(matching_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "surplus food matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
