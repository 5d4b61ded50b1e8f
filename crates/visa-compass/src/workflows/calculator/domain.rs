use serde::{Deserialize, Serialize};

/// Marital status captured on the personal background step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaritalStatus {
    Single,
    Married,
    CommonLaw,
}

/// Highest completed education level.
///
/// Values outside the questionnaire's options land in `Unrecognized`, which the
/// scoring rules treat with a fallback weight and intake rejects outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "highSchool")]
    HighSchool,
    #[serde(rename = "bachelor")]
    Bachelor,
    #[serde(rename = "master")]
    Master,
    #[serde(rename = "phd")]
    Phd,
    #[serde(rename = "other")]
    Other,
    #[serde(rename = "unrecognized", other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Student,
    Unemployed,
}

/// English proficiency test the applicant sat, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnglishTest {
    Ielts,
    Toefl,
    Pte,
    None,
}

impl EnglishTest {
    pub const fn was_taken(self) -> bool {
        !matches!(self, EnglishTest::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisaType {
    Work,
    Study,
    Family,
    Business,
    Skilled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobOfferStatus {
    Yes,
    No,
    NotYet,
}

/// Liquid funds bracket available for relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinancialResources {
    #[serde(rename = "<5k")]
    Under5k,
    #[serde(rename = "5k-15k")]
    From5kTo15k,
    #[serde(rename = "15k-30k")]
    From15kTo30k,
    #[serde(rename = "30k-50k")]
    From30kTo50k,
    #[serde(rename = "50k+")]
    Over50k,
    #[serde(rename = "unrecognized", other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "immediate")]
    Immediate,
    #[serde(rename = "3-6months")]
    ThreeToSixMonths,
    #[serde(rename = "6-12months")]
    SixToTwelveMonths,
    #[serde(rename = "1-2years")]
    OneToTwoYears,
    #[serde(rename = "flexible")]
    Flexible,
}

/// Validated questionnaire answers handed to the scoring engine.
///
/// Conditional fields are `Option`s: `None` means "not applicable" and every
/// rule reading them treats absence as a zero contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub current_country: String,
    pub citizenship: String,
    pub target_country: String,
    #[serde(default)]
    pub age: Option<u8>,
    pub marital_status: MaritalStatus,
    pub has_dependents: bool,
    #[serde(default)]
    pub dependents_count: Option<u32>,

    pub education_level: EducationLevel,
    pub field_of_study: String,
    #[serde(default)]
    pub years_of_experience: Option<u32>,
    pub work_domain: String,
    pub employment_status: EmploymentStatus,
    pub annual_income: String,

    pub english_test: EnglishTest,
    #[serde(default)]
    pub english_score: Option<f64>,
    #[serde(default)]
    pub other_languages: Vec<String>,
    pub visa_type: VisaType,
    pub previous_visa_applications: bool,
    #[serde(default)]
    pub previous_approvals: Option<u32>,
    #[serde(default)]
    pub previous_refusals: Option<u32>,
    pub has_job_offer: JobOfferStatus,

    pub financial_resources: FinancialResources,
    pub timeline: Timeline,
    pub has_family_in_target: bool,
    #[serde(default)]
    pub additional_info: Option<String>,
}

/// Three-way probability label derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbabilityTier {
    High,
    Medium,
    Low,
}

impl ProbabilityTier {
    pub const fn label(self) -> &'static str {
        match self {
            ProbabilityTier::High => "high",
            ProbabilityTier::Medium => "medium",
            ProbabilityTier::Low => "low",
        }
    }
}

/// Per-category points as reported to the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub personal: i32,
    pub education: i32,
    /// Floored at zero; the total uses the unfloored value.
    pub qualifications: i32,
    pub financial: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    pub total_score: u8,
    pub probability: ProbabilityTier,
    pub category_scores: CategoryScores,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

/// Stable key for each recommendation so a presentation layer can localize it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    TakeEnglishTest,
    ImproveEnglishScore,
    SecureJobOffer,
    FurtherEducation,
    GainExperience,
    ImproveFinances,
    AddressRefusals,
    HighlightTransferableSkills,
    AgeFlexibleCategories,
    BookConsultation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    pub priority: Priority,
}

/// Scoring output paired with its ranked recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub result: ScoringResult,
    pub recommendations: Vec<Recommendation>,
}
