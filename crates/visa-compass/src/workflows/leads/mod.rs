//! Lead capture for the consultation application form.

pub mod domain;
pub mod router;
pub mod service;
pub mod validation;


pub use domain::{LeadApplication, LeadEnvelope, LeadReceipt, LeadReference};
pub use router::lead_router;
pub use service::{LeadService, LeadServiceError, LeadSink, LeadSinkError};
pub use validation::{validate_lead, LeadValidationError};
