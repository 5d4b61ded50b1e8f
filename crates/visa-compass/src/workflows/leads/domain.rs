use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier handed back to the visitor once a lead has been accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadReference(pub String);

/// Consultation request captured by the public application form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadApplication {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub nationality: String,
    pub current_location: String,

    pub education: String,
    pub field_of_study: String,
    pub experience: String,
    pub occupation: String,
    pub skills: String,
    pub languages: Vec<String>,

    pub destination: String,
    pub purpose: String,
    pub timeline: String,
    pub additional_info: Option<String>,

    pub terms: bool,
    pub privacy: bool,
}

/// Accepted lead as forwarded to the downstream sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadEnvelope {
    pub reference: LeadReference,
    pub received_at: DateTime<Utc>,
    pub application: LeadApplication,
}

/// Response body returned once a lead has been handed off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadReceipt {
    pub reference: LeadReference,
    pub status: &'static str,
}
