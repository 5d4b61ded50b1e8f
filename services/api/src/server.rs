use crate::cli::ServeArgs;
use crate::infra::{AppState, TracingLeadSink};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use visa_compass::config::AppConfig;
use visa_compass::error::AppError;
use visa_compass::telemetry;
use visa_compass::workflows::calculator::{CalculatorService, InMemoryProgressStore};
use visa_compass::workflows::leads::LeadService;

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

    let progress = Arc::new(InMemoryProgressStore::default());
    let calculator = Arc::new(CalculatorService::new(
        progress,
        config.calculator.clone(),
    ));
    let leads = Arc::new(LeadService::new(Arc::new(TracingLeadSink)));

    let app = with_service_routes(calculator, leads)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        high_threshold = config.calculator.policy.high_threshold,
        medium_threshold = config.calculator.policy.medium_threshold,
        "visa calculator service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
