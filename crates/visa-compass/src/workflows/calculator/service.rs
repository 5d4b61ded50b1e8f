use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use super::config::CalculatorConfig;
use super::domain::{AnswerRecord, Assessment};
use super::intake::{self, IntakeError, WizardDraft, WizardStep};
use super::progress::{ProgressError, ProgressStore, SavedProgress, SessionId};
use super::recommendations::RecommendationGenerator;
use super::scoring::ScoringEngine;

/// Service composing intake validation, scoring, recommendations, and the progress store.
pub struct CalculatorService<P> {
    progress: Arc<P>,
    engine: ScoringEngine,
    generator: RecommendationGenerator,
    progress_ttl: Duration,
    processing_delay: StdDuration,
}

impl<P> CalculatorService<P>
where
    P: ProgressStore + 'static,
{
    pub fn new(progress: Arc<P>, config: CalculatorConfig) -> Self {
        let progress_ttl = config.progress_ttl();
        let processing_delay = config.processing_delay();

        Self {
            progress,
            engine: ScoringEngine::new(config.policy.clone()),
            generator: RecommendationGenerator::new(config.policy),
            progress_ttl,
            processing_delay,
        }
    }

    pub fn processing_delay(&self) -> StdDuration {
        self.processing_delay
    }

    /// Score an already validated answer record.
    pub fn evaluate(&self, answers: &AnswerRecord) -> Assessment {
        let result = self.engine.score(answers);
        let recommendations = self.generator.recommend(answers, &result);
        Assessment {
            result,
            recommendations,
        }
    }

    /// Validate a completed draft and return its assessment.
    pub fn assess(&self, draft: &WizardDraft) -> Result<Assessment, CalculatorServiceError> {
        let answers = intake::assemble(draft).map_err(|error| {
            warn!(violations = error.violations.len(), "assessment rejected by intake");
            error
        })?;

        let assessment = self.evaluate(&answers);
        info!(
            total_score = assessment.result.total_score,
            probability = assessment.result.probability.label(),
            recommendations = assessment.recommendations.len(),
            "assessment completed"
        );
        Ok(assessment)
    }

    /// Assess a draft and drop the session's saved progress once it succeeds.
    pub fn assess_session(
        &self,
        session: &SessionId,
        draft: &WizardDraft,
    ) -> Result<Assessment, CalculatorServiceError> {
        let assessment = self.assess(draft)?;
        self.progress.clear(session)?;
        Ok(assessment)
    }

    pub fn validate_step(
        &self,
        step: WizardStep,
        draft: &WizardDraft,
    ) -> Result<(), CalculatorServiceError> {
        intake::validate_step(step, draft)?;
        Ok(())
    }

    pub fn save_progress(
        &self,
        session: &SessionId,
        draft: WizardDraft,
        step: WizardStep,
        now: DateTime<Utc>,
    ) -> Result<(), CalculatorServiceError> {
        if draft.is_empty() {
            return Ok(());
        }

        let purged = self.progress.purge_expired(now, self.progress_ttl)?;
        if purged > 0 {
            debug!(purged, "evicted expired wizard progress");
        }
        self.progress
            .save(session, SavedProgress::new(draft, step, now))?;
        Ok(())
    }

    /// Load saved progress, discarding snapshots older than the configured TTL.
    pub fn restore_progress(
        &self,
        session: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<Option<SavedProgress>, CalculatorServiceError> {
        match self.progress.load(session)? {
            Some(saved) if saved.is_expired(now, self.progress_ttl) => {
                self.progress.clear(session)?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    pub fn discard_progress(&self, session: &SessionId) -> Result<(), CalculatorServiceError> {
        self.progress.clear(session)?;
        Ok(())
    }
}

/// Error raised by the calculator service.
#[derive(Debug, thiserror::Error)]
pub enum CalculatorServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}
