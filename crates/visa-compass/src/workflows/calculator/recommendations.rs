use super::domain::{
    AnswerRecord, EducationLevel, EnglishTest, JobOfferStatus, Priority, Recommendation,
    RecommendationKind, ScoringResult,
};
use super::scoring::ScoringPolicy;

/// Upper bound on the recommendations returned to the results view.
pub const MAX_RECOMMENDATIONS: usize = 5;

const TARGET_ENGLISH_SCORE: f64 = 7.0;
const PREFERRED_EXPERIENCE_YEARS: u32 = 3;
const MINIMUM_FINANCIAL_SUBSCORE: i32 = 5;
const AGE_FLEXIBLE_THRESHOLD: u8 = 45;

/// Builds ranked, capped next steps from the answers and their scoring result.
#[derive(Debug, Clone, Default)]
pub struct RecommendationGenerator {
    policy: ScoringPolicy,
}

impl RecommendationGenerator {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn recommend(
        &self,
        answers: &AnswerRecord,
        result: &ScoringResult,
    ) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        if answers.english_test == EnglishTest::None {
            recommendations.push(entry(
                RecommendationKind::TakeEnglishTest,
                "Take an English Proficiency Test",
                "IELTS, TOEFL, or PTE scores are mandatory for most visa applications. Aim for IELTS 7+ for the best chances.",
                Some("Book IELTS test"),
                Priority::High,
            ));
        } else if answers
            .english_score
            .map(|score| score < TARGET_ENGLISH_SCORE)
            .unwrap_or(false)
        {
            recommendations.push(entry(
                RecommendationKind::ImproveEnglishScore,
                "Improve Your English Test Score",
                "A higher English proficiency score (7.0+) can significantly improve your visa chances. Consider retaking the test after preparation.",
                Some("Find IELTS preparation courses"),
                Priority::High,
            ));
        }

        if answers.has_job_offer == JobOfferStatus::No {
            recommendations.push(entry(
                RecommendationKind::SecureJobOffer,
                "Secure a Job Offer",
                "A valid job offer from an employer in your target country can significantly improve your visa chances and may open up employer-sponsored visa pathways.",
                Some("Explore job opportunities"),
                Priority::High,
            ));
        }

        if matches!(
            answers.education_level,
            EducationLevel::HighSchool | EducationLevel::Other
        ) {
            recommendations.push(entry(
                RecommendationKind::FurtherEducation,
                "Consider Further Education",
                "Higher education qualifications (Bachelor's, Master's, or PhD) substantially increase your visa eligibility for most countries.",
                Some("View study programs"),
                Priority::Medium,
            ));
        }

        if answers
            .years_of_experience
            .map(|years| years < PREFERRED_EXPERIENCE_YEARS)
            .unwrap_or(false)
        {
            recommendations.push(entry(
                RecommendationKind::GainExperience,
                "Gain More Work Experience",
                "Most countries prefer applicants with 3-5+ years of relevant work experience. Continue building your career in your field.",
                None,
                Priority::Medium,
            ));
        }

        if result.category_scores.financial < MINIMUM_FINANCIAL_SUBSCORE {
            recommendations.push(entry(
                RecommendationKind::ImproveFinances,
                "Improve Financial Position",
                "Build up your savings and financial resources. Most visa applications require proof of funds ranging from $15,000 to $50,000 depending on the country.",
                None,
                Priority::High,
            ));
        }

        if answers.previous_visa_applications
            && answers.previous_refusals.map(|count| count > 0).unwrap_or(false)
        {
            recommendations.push(entry(
                RecommendationKind::AddressRefusals,
                "Address Previous Visa Refusals",
                "Previous refusals can impact new applications. Our advisors can help you understand the reasons and strengthen your new application accordingly.",
                Some("Book consultation"),
                Priority::High,
            ));
        }

        if !self.policy.is_stem_field(&answers.field_of_study)
            && answers.education_level != EducationLevel::HighSchool
        {
            recommendations.push(entry(
                RecommendationKind::HighlightTransferableSkills,
                "Highlight Transferable Skills",
                "While your field is valuable, emphasize how your skills meet labor market needs in your target country. Consider additional certifications in high-demand areas.",
                None,
                Priority::Low,
            ));
        }

        if answers
            .age
            .map(|age| age > AGE_FLEXIBLE_THRESHOLD)
            .unwrap_or(false)
        {
            recommendations.push(entry(
                RecommendationKind::AgeFlexibleCategories,
                "Explore Age-Flexible Visa Categories",
                "Some visa categories have age preferences. Our experts can guide you to pathways that value experience and expertise over age.",
                Some("Book consultation"),
                Priority::Medium,
            ));
        }

        recommendations.push(entry(
            RecommendationKind::BookConsultation,
            "Book a Professional Consultation",
            "Our expert advisors can provide personalized guidance, identify the best visa pathway for your profile, and help you prepare a strong application.",
            Some("Book free consultation"),
            Priority::High,
        ));

        rank(recommendations)
    }
}

/// Generate recommendations with the default policy.
pub fn recommend(answers: &AnswerRecord, result: &ScoringResult) -> Vec<Recommendation> {
    RecommendationGenerator::default().recommend(answers, result)
}

fn rank(mut recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
    // `sort_by_key` is stable, so equal priorities keep generation order.
    recommendations.sort_by_key(|recommendation| recommendation.priority.rank());
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

fn entry(
    kind: RecommendationKind,
    title: &str,
    description: &str,
    action: Option<&str>,
    priority: Priority,
) -> Recommendation {
    Recommendation {
        kind,
        title: title.to_string(),
        description: description.to_string(),
        action: action.map(str::to_string),
        priority,
    }
}
