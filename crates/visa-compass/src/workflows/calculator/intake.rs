//! Wizard intake: per-step validation of the in-progress questionnaire and
//! assembly of the final [`AnswerRecord`] once every step passes.

use serde::{Deserialize, Serialize};

use super::domain::{
    AnswerRecord, EducationLevel, EmploymentStatus, EnglishTest, FinancialResources,
    JobOfferStatus, MaritalStatus, Timeline, VisaType,
};

const MINIMUM_AGE: u8 = 18;
const MAXIMUM_AGE: u8 = 99;

/// The four questionnaire steps, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WizardStep {
    Personal,
    EducationWork,
    Qualifications,
    FinancialTimeline,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Personal,
        WizardStep::EducationWork,
        WizardStep::Qualifications,
        WizardStep::FinancialTimeline,
    ];

    pub const fn index(self) -> u8 {
        match self {
            WizardStep::Personal => 0,
            WizardStep::EducationWork => 1,
            WizardStep::Qualifications => 2,
            WizardStep::FinancialTimeline => 3,
        }
    }

    pub fn next(self) -> Option<WizardStep> {
        Self::ALL.get(usize::from(self.index()) + 1).copied()
    }

    pub fn previous(self) -> Option<WizardStep> {
        usize::from(self.index())
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub const fn is_last(self) -> bool {
        matches!(self, WizardStep::FinancialTimeline)
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| format!("wizard step {value} is out of range (0-3)"))
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.index()
    }
}

/// Partially completed questionnaire as the wizard holds it between steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardDraft {
    pub current_country: Option<String>,
    pub citizenship: Option<String>,
    pub target_country: Option<String>,
    /// Kept wide so out-of-range input reaches the field checks instead of failing to parse.
    pub age: Option<i64>,
    pub marital_status: Option<MaritalStatus>,
    pub has_dependents: Option<bool>,
    pub dependents_count: Option<u32>,

    pub education_level: Option<EducationLevel>,
    pub field_of_study: Option<String>,
    pub years_of_experience: Option<i64>,
    pub work_domain: Option<String>,
    pub employment_status: Option<EmploymentStatus>,
    pub annual_income: Option<String>,

    pub english_test: Option<EnglishTest>,
    pub english_score: Option<f64>,
    pub other_languages: Option<Vec<String>>,
    pub visa_type: Option<VisaType>,
    pub previous_visa_applications: Option<bool>,
    pub previous_approvals: Option<u32>,
    pub previous_refusals: Option<u32>,
    pub has_job_offer: Option<JobOfferStatus>,

    pub financial_resources: Option<FinancialResources>,
    pub timeline: Option<Timeline>,
    pub has_family_in_target: Option<bool>,
    pub additional_info: Option<String>,
}

impl WizardDraft {
    pub fn is_empty(&self) -> bool {
        *self == WizardDraft::default()
    }
}

/// A single failed field check, keyed by the wire name of the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Validation failure carrying every violated field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("answers failed validation: {}", describe(.violations))]
pub struct IntakeError {
    pub violations: Vec<FieldViolation>,
}

impl IntakeError {
    pub fn fields(&self) -> Vec<&str> {
        self.violations
            .iter()
            .map(|violation| violation.field.as_str())
            .collect()
    }
}

fn describe(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|violation| format!("{}: {}", violation.field, violation.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate the fields owned by one wizard step.
pub fn validate_step(step: WizardStep, draft: &WizardDraft) -> Result<(), IntakeError> {
    let violations = match step {
        WizardStep::Personal => personal_step(draft).err(),
        WizardStep::EducationWork => education_step(draft).err(),
        WizardStep::Qualifications => qualifications_step(draft).err(),
        WizardStep::FinancialTimeline => financial_step(draft).err(),
    };

    match violations {
        Some(violations) => Err(IntakeError { violations }),
        None => Ok(()),
    }
}

/// Validate every step and build the answer record handed to the scoring engine.
pub fn assemble(draft: &WizardDraft) -> Result<AnswerRecord, IntakeError> {
    match (
        personal_step(draft),
        education_step(draft),
        qualifications_step(draft),
        financial_step(draft),
    ) {
        (Ok(personal), Ok(education), Ok(qualifications), Ok(financial)) => Ok(AnswerRecord {
            current_country: personal.current_country,
            citizenship: personal.citizenship,
            target_country: personal.target_country,
            age: Some(personal.age),
            marital_status: personal.marital_status,
            has_dependents: personal.has_dependents,
            dependents_count: personal.dependents_count,
            education_level: education.education_level,
            field_of_study: education.field_of_study,
            years_of_experience: Some(education.years_of_experience),
            work_domain: education.work_domain,
            employment_status: education.employment_status,
            annual_income: education.annual_income,
            english_test: qualifications.english_test,
            english_score: qualifications.english_score,
            other_languages: qualifications.other_languages,
            visa_type: qualifications.visa_type,
            previous_visa_applications: qualifications.previous_visa_applications,
            previous_approvals: qualifications.previous_approvals,
            previous_refusals: qualifications.previous_refusals,
            has_job_offer: qualifications.has_job_offer,
            financial_resources: financial.financial_resources,
            timeline: financial.timeline,
            has_family_in_target: financial.has_family_in_target,
            additional_info: financial.additional_info,
        }),
        (personal, education, qualifications, financial) => {
            let violations = [
                personal.err(),
                education.err(),
                qualifications.err(),
                financial.err(),
            ]
            .into_iter()
            .flatten()
            .flatten()
            .collect();
            Err(IntakeError { violations })
        }
    }
}

struct PersonalStep {
    current_country: String,
    citizenship: String,
    target_country: String,
    age: u8,
    marital_status: MaritalStatus,
    has_dependents: bool,
    dependents_count: Option<u32>,
}

struct EducationStep {
    education_level: EducationLevel,
    field_of_study: String,
    years_of_experience: u32,
    work_domain: String,
    employment_status: EmploymentStatus,
    annual_income: String,
}

struct QualificationsStep {
    english_test: EnglishTest,
    english_score: Option<f64>,
    other_languages: Vec<String>,
    visa_type: VisaType,
    previous_visa_applications: bool,
    previous_approvals: Option<u32>,
    previous_refusals: Option<u32>,
    has_job_offer: JobOfferStatus,
}

struct FinancialStep {
    financial_resources: FinancialResources,
    timeline: Timeline,
    has_family_in_target: bool,
    additional_info: Option<String>,
}

#[derive(Default)]
struct Checks {
    violations: Vec<FieldViolation>,
}

impl Checks {
    fn reject(&mut self, field: &str, message: &str) {
        self.violations.push(FieldViolation {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    fn text(&mut self, field: &str, value: &Option<String>, message: &str) -> Option<String> {
        match value.as_deref().map(str::trim) {
            Some(trimmed) if !trimmed.is_empty() => Some(trimmed.to_string()),
            _ => {
                self.reject(field, message);
                None
            }
        }
    }

    fn required<T: Copy>(&mut self, field: &str, value: Option<T>, message: &str) -> Option<T> {
        if value.is_none() {
            self.reject(field, message);
        }
        value
    }
}

fn personal_step(draft: &WizardDraft) -> Result<PersonalStep, Vec<FieldViolation>> {
    let mut checks = Checks::default();

    let current_country = checks.text(
        "currentCountry",
        &draft.current_country,
        "Current country is required",
    );
    let citizenship = checks.text("citizenship", &draft.citizenship, "Citizenship is required");
    let target_country = checks.text(
        "targetCountry",
        &draft.target_country,
        "Target country is required",
    );

    let age = match draft.age {
        None => {
            checks.reject("age", "Age is required");
            None
        }
        Some(age) if age < i64::from(MINIMUM_AGE) => {
            checks.reject("age", "Must be at least 18");
            None
        }
        Some(age) => match u8::try_from(age).ok().filter(|age| *age <= MAXIMUM_AGE) {
            Some(age) => Some(age),
            None => {
                checks.reject("age", "Invalid age");
                None
            }
        },
    };

    let marital_status = checks.required(
        "maritalStatus",
        draft.marital_status,
        "Marital status is required",
    );
    let has_dependents = checks.required(
        "hasDependents",
        draft.has_dependents,
        "Please indicate whether you have dependents",
    );

    match (
        current_country,
        citizenship,
        target_country,
        age,
        marital_status,
        has_dependents,
    ) {
        (
            Some(current_country),
            Some(citizenship),
            Some(target_country),
            Some(age),
            Some(marital_status),
            Some(has_dependents),
        ) => Ok(PersonalStep {
            current_country,
            citizenship,
            target_country,
            age,
            marital_status,
            has_dependents,
            dependents_count: draft.dependents_count.filter(|_| has_dependents),
        }),
        _ => Err(checks.violations),
    }
}

fn education_step(draft: &WizardDraft) -> Result<EducationStep, Vec<FieldViolation>> {
    let mut checks = Checks::default();

    let education_level = match draft.education_level {
        None => {
            checks.reject("educationLevel", "Education level is required");
            None
        }
        Some(EducationLevel::Unrecognized) => {
            checks.reject("educationLevel", "Select a valid education level");
            None
        }
        Some(level) => Some(level),
    };
    let field_of_study = checks.text(
        "fieldOfStudy",
        &draft.field_of_study,
        "Field of study is required",
    );
    let years_of_experience = match draft
        .years_of_experience
        .and_then(|years| u32::try_from(years).ok())
    {
        Some(years) => Some(years),
        None => {
            checks.reject("yearsOfExperience", "Invalid experience");
            None
        }
    };
    let work_domain = checks.text("workDomain", &draft.work_domain, "Work domain is required");
    let employment_status = checks.required(
        "employmentStatus",
        draft.employment_status,
        "Employment status is required",
    );
    let annual_income = checks.text(
        "annualIncome",
        &draft.annual_income,
        "Income range is required",
    );

    match (
        education_level,
        field_of_study,
        years_of_experience,
        work_domain,
        employment_status,
        annual_income,
    ) {
        (
            Some(education_level),
            Some(field_of_study),
            Some(years_of_experience),
            Some(work_domain),
            Some(employment_status),
            Some(annual_income),
        ) => Ok(EducationStep {
            education_level,
            field_of_study,
            years_of_experience,
            work_domain,
            employment_status,
            annual_income,
        }),
        _ => Err(checks.violations),
    }
}

fn qualifications_step(draft: &WizardDraft) -> Result<QualificationsStep, Vec<FieldViolation>> {
    let mut checks = Checks::default();

    let english_test = checks.required(
        "englishTest",
        draft.english_test,
        "English test selection is required",
    );
    let mut score_valid = true;
    if let Some(score) = draft.english_score {
        if !score.is_finite() || score < 0.0 {
            checks.reject("englishScore", "Invalid English score");
            score_valid = false;
        }
    }
    let visa_type = checks.required("visaType", draft.visa_type, "Visa type is required");
    let previous_visa_applications = checks.required(
        "previousVisaApplications",
        draft.previous_visa_applications,
        "Please indicate whether you have applied for a visa before",
    );
    let has_job_offer = checks.required(
        "hasJobOffer",
        draft.has_job_offer,
        "Job offer status is required",
    );

    match (
        english_test,
        visa_type,
        previous_visa_applications,
        has_job_offer,
        score_valid,
    ) {
        (
            Some(english_test),
            Some(visa_type),
            Some(previous_visa_applications),
            Some(has_job_offer),
            true,
        ) => Ok(QualificationsStep {
            english_test,
            english_score: draft.english_score.filter(|_| english_test.was_taken()),
            other_languages: draft.other_languages.clone().unwrap_or_default(),
            visa_type,
            previous_visa_applications,
            previous_approvals: draft
                .previous_approvals
                .filter(|_| previous_visa_applications),
            previous_refusals: draft
                .previous_refusals
                .filter(|_| previous_visa_applications),
            has_job_offer,
        }),
        _ => Err(checks.violations),
    }
}

fn financial_step(draft: &WizardDraft) -> Result<FinancialStep, Vec<FieldViolation>> {
    let mut checks = Checks::default();

    let financial_resources = match draft.financial_resources {
        None => {
            checks.reject("financialResources", "Financial resources are required");
            None
        }
        Some(FinancialResources::Unrecognized) => {
            checks.reject("financialResources", "Select a valid financial range");
            None
        }
        Some(resources) => Some(resources),
    };
    let timeline = checks.required("timeline", draft.timeline, "Timeline is required");
    let has_family_in_target = checks.required(
        "hasFamilyInTarget",
        draft.has_family_in_target,
        "Please indicate whether you have family in the target country",
    );

    match (financial_resources, timeline, has_family_in_target) {
        (Some(financial_resources), Some(timeline), Some(has_family_in_target)) => {
            Ok(FinancialStep {
                financial_resources,
                timeline,
                has_family_in_target,
                additional_info: draft
                    .additional_info
                    .as_deref()
                    .map(str::trim)
                    .filter(|info| !info.is_empty())
                    .map(str::to_string),
            })
        }
        _ => Err(checks.violations),
    }
}
