use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use visa_compass::workflows::leads::{LeadEnvelope, LeadSink, LeadSinkError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Lead sink that writes accepted leads to the structured log until a CRM hook is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct TracingLeadSink;

impl LeadSink for TracingLeadSink {
    fn forward(&self, envelope: LeadEnvelope) -> Result<(), LeadSinkError> {
        let application = &envelope.application;
        info!(
            reference = %envelope.reference.0,
            received_at = %envelope.received_at,
            destination = %application.destination,
            purpose = %application.purpose,
            timeline = %application.timeline,
            languages = application.languages.len(),
            "lead forwarded"
        );
        Ok(())
    }
}
