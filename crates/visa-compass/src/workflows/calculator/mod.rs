//! Visa probability calculator: wizard intake, scoring, recommendations, and
//! the HTTP surface that hosts them.

pub mod config;
pub mod domain;
pub mod intake;
pub mod progress;
pub mod recommendations;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use config::CalculatorConfig;
pub use domain::{
    AnswerRecord, Assessment, CategoryScores, EducationLevel, EmploymentStatus, EnglishTest,
    FinancialResources, JobOfferStatus, MaritalStatus, Priority, ProbabilityTier, Recommendation,
    RecommendationKind, ScoringResult, Timeline, VisaType,
};
pub use intake::{assemble, validate_step, FieldViolation, IntakeError, WizardDraft, WizardStep};
pub use progress::{InMemoryProgressStore, ProgressError, ProgressStore, SavedProgress, SessionId};
pub use recommendations::{recommend, RecommendationGenerator, MAX_RECOMMENDATIONS};
pub use router::calculator_router;
pub use scoring::{
    score, ScoringEngine, ScoringPolicy, HIGH_DEMAND_COUNTRIES, HIGH_PROBABILITY_THRESHOLD,
    MEDIUM_PROBABILITY_THRESHOLD, STEM_FIELD_KEYWORDS,
};
pub use service::{CalculatorService, CalculatorServiceError};
