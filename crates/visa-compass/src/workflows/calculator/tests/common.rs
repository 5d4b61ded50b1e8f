use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::workflows::calculator::domain::{
    AnswerRecord, EducationLevel, EmploymentStatus, EnglishTest, FinancialResources,
    JobOfferStatus, MaritalStatus, Timeline, VisaType,
};
use crate::workflows::calculator::intake::WizardDraft;
use crate::workflows::calculator::progress::{
    InMemoryProgressStore, ProgressError, ProgressStore, SavedProgress, SessionId,
};
use crate::workflows::calculator::{CalculatorConfig, CalculatorService};

/// Young, highly qualified applicant with a job offer and strong savings.
pub(super) fn strong_profile() -> AnswerRecord {
    AnswerRecord {
        current_country: "India".to_string(),
        citizenship: "Indian".to_string(),
        target_country: "Canada".to_string(),
        age: Some(30),
        marital_status: MaritalStatus::Single,
        has_dependents: false,
        dependents_count: None,
        education_level: EducationLevel::Master,
        field_of_study: "Computer Science".to_string(),
        years_of_experience: Some(6),
        work_domain: "Software".to_string(),
        employment_status: EmploymentStatus::Employed,
        annual_income: "50k-75k".to_string(),
        english_test: EnglishTest::Ielts,
        english_score: Some(8.0),
        other_languages: vec!["Hindi".to_string()],
        visa_type: VisaType::Skilled,
        previous_visa_applications: false,
        previous_approvals: None,
        previous_refusals: None,
        has_job_offer: JobOfferStatus::Yes,
        financial_resources: FinancialResources::Over50k,
        timeline: Timeline::Flexible,
        has_family_in_target: false,
        additional_info: None,
    }
}

/// Older applicant with a large household, no test, no offer, and thin savings.
pub(super) fn weak_profile() -> AnswerRecord {
    AnswerRecord {
        current_country: "Vietnam".to_string(),
        citizenship: "Vietnamese".to_string(),
        target_country: "Vietnam".to_string(),
        age: Some(50),
        marital_status: MaritalStatus::Married,
        has_dependents: true,
        dependents_count: Some(3),
        education_level: EducationLevel::HighSchool,
        field_of_study: String::new(),
        years_of_experience: Some(0),
        work_domain: "Retail".to_string(),
        employment_status: EmploymentStatus::Unemployed,
        annual_income: "<10k".to_string(),
        english_test: EnglishTest::None,
        english_score: None,
        other_languages: Vec::new(),
        visa_type: VisaType::Work,
        previous_visa_applications: false,
        previous_approvals: None,
        previous_refusals: None,
        has_job_offer: JobOfferStatus::No,
        financial_resources: FinancialResources::Under5k,
        timeline: Timeline::Immediate,
        has_family_in_target: false,
        additional_info: None,
    }
}

/// Strong profile with a mixed visa history (two approvals, three refusals).
pub(super) fn refusal_profile() -> AnswerRecord {
    AnswerRecord {
        previous_visa_applications: true,
        previous_approvals: Some(2),
        previous_refusals: Some(3),
        ..strong_profile()
    }
}

pub(super) fn draft_from(record: &AnswerRecord) -> WizardDraft {
    WizardDraft {
        current_country: Some(record.current_country.clone()),
        citizenship: Some(record.citizenship.clone()),
        target_country: Some(record.target_country.clone()),
        age: record.age.map(i64::from),
        marital_status: Some(record.marital_status),
        has_dependents: Some(record.has_dependents),
        dependents_count: record.dependents_count,
        education_level: Some(record.education_level),
        field_of_study: Some(record.field_of_study.clone()),
        years_of_experience: record.years_of_experience.map(i64::from),
        work_domain: Some(record.work_domain.clone()),
        employment_status: Some(record.employment_status),
        annual_income: Some(record.annual_income.clone()),
        english_test: Some(record.english_test),
        english_score: record.english_score,
        other_languages: Some(record.other_languages.clone()),
        visa_type: Some(record.visa_type),
        previous_visa_applications: Some(record.previous_visa_applications),
        previous_approvals: record.previous_approvals,
        previous_refusals: record.previous_refusals,
        has_job_offer: Some(record.has_job_offer),
        financial_resources: Some(record.financial_resources),
        timeline: Some(record.timeline),
        has_family_in_target: Some(record.has_family_in_target),
        additional_info: record.additional_info.clone(),
    }
}

pub(super) fn build_service() -> (
    CalculatorService<InMemoryProgressStore>,
    Arc<InMemoryProgressStore>,
) {
    let store = Arc::new(InMemoryProgressStore::default());
    let service = CalculatorService::new(store.clone(), CalculatorConfig::default());
    (service, store)
}

pub(super) fn session(id: &str) -> SessionId {
    SessionId(id.to_string())
}

/// Store that fails every call, for exercising error mapping.
pub(super) struct UnavailableProgressStore;

impl ProgressStore for UnavailableProgressStore {
    fn save(&self, _session: &SessionId, _progress: SavedProgress) -> Result<(), ProgressError> {
        Err(ProgressError::Unavailable("redis down".to_string()))
    }

    fn load(&self, _session: &SessionId) -> Result<Option<SavedProgress>, ProgressError> {
        Err(ProgressError::Unavailable("redis down".to_string()))
    }

    fn clear(&self, _session: &SessionId) -> Result<(), ProgressError> {
        Err(ProgressError::Unavailable("redis down".to_string()))
    }

    fn purge_expired(&self, _now: DateTime<Utc>, _ttl: Duration) -> Result<usize, ProgressError> {
        Err(ProgressError::Unavailable("redis down".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
