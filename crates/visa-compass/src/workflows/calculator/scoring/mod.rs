mod policy;
mod rules;

pub use policy::{
    ScoringPolicy, HIGH_DEMAND_COUNTRIES, HIGH_PROBABILITY_THRESHOLD,
    MEDIUM_PROBABILITY_THRESHOLD, STEM_FIELD_KEYWORDS,
};

use super::domain::{AnswerRecord, CategoryScores, ScoringResult};
use tracing::debug;

const MAX_TOTAL_SCORE: i32 = 100;

/// Stateless engine that applies the scoring policy to an answer record.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    policy: ScoringPolicy,
}

impl ScoringEngine {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn score(&self, answers: &AnswerRecord) -> ScoringResult {
        let (points, findings) = rules::score_answers(answers, &self.policy);

        // The raw qualifications value feeds the total even when negative; only
        // the reported subscore is floored.
        let capped = points.sum().min(MAX_TOTAL_SCORE);
        let total_score = u8::try_from(capped).unwrap_or(0);
        let probability = self.policy.tier_for(total_score);

        debug!(
            personal = points.personal,
            education = points.education,
            qualifications = points.qualifications,
            financial = points.financial,
            total_score,
            "scored answer record"
        );

        ScoringResult {
            total_score,
            probability,
            category_scores: CategoryScores {
                personal: points.personal,
                education: points.education,
                qualifications: points.qualifications.max(0),
                financial: points.financial,
            },
            strengths: findings.strengths,
            weaknesses: findings.weaknesses,
        }
    }
}

/// Score an answer record with the default policy.
pub fn score(answers: &AnswerRecord) -> ScoringResult {
    ScoringEngine::default().score(answers)
}
