use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::domain::{LeadApplication, LeadEnvelope, LeadReceipt, LeadReference};
use super::validation::{validate_lead, LeadValidationError};

/// Outbound hook for accepted leads (CRM, e-mail relay, log drain).
pub trait LeadSink: Send + Sync {
    fn forward(&self, envelope: LeadEnvelope) -> Result<(), LeadSinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LeadSinkError {
    #[error("lead sink unavailable: {0}")]
    Unavailable(String),
}

/// Validates application form submissions and hands them to the configured sink.
pub struct LeadService<S> {
    sink: Arc<S>,
    sequence: AtomicU64,
}

impl<S> LeadService<S>
where
    S: LeadSink + 'static,
{
    pub fn new(sink: Arc<S>) -> Self {
        Self {
            sink,
            sequence: AtomicU64::new(1),
        }
    }

    pub fn submit(
        &self,
        application: LeadApplication,
        received_at: DateTime<Utc>,
    ) -> Result<LeadReceipt, LeadServiceError> {
        let application = validate_lead(application)?;
        let reference = self.next_reference();

        self.sink.forward(LeadEnvelope {
            reference: reference.clone(),
            received_at,
            application,
        })?;

        info!(reference = %reference.0, "lead accepted");
        Ok(LeadReceipt {
            reference,
            status: "received",
        })
    }

    fn next_reference(&self) -> LeadReference {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        LeadReference(format!("lead-{id:06}"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Validation(#[from] LeadValidationError),
    #[error(transparent)]
    Sink(#[from] LeadSinkError),
}
