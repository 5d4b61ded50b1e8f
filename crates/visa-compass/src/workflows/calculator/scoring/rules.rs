use super::super::domain::{
    AnswerRecord, EducationLevel, FinancialResources, JobOfferStatus, Timeline,
};
use super::policy::ScoringPolicy;

const CURRENT_LOCATION_BASELINE: i32 = 5;
const MAX_HISTORY_ADJUSTMENT: u32 = 5;

/// Strength and weakness notes in the order the rules produced them.
#[derive(Debug, Default)]
pub(crate) struct Findings {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl Findings {
    fn strength(&mut self, note: &str) {
        self.strengths.push(note.to_string());
    }

    fn weakness(&mut self, note: &str) {
        self.weaknesses.push(note.to_string());
    }
}

/// Raw category points before aggregation. Qualifications may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawCategoryPoints {
    pub personal: i32,
    pub education: i32,
    pub qualifications: i32,
    pub financial: i32,
}

impl RawCategoryPoints {
    pub fn sum(&self) -> i32 {
        self.personal + self.education + self.qualifications + self.financial
    }
}

pub(crate) fn score_answers(
    answers: &AnswerRecord,
    policy: &ScoringPolicy,
) -> (RawCategoryPoints, Findings) {
    let mut findings = Findings::default();

    let points = RawCategoryPoints {
        personal: personal_points(answers, policy, &mut findings),
        education: education_points(answers, policy, &mut findings),
        qualifications: qualification_points(answers, &mut findings),
        financial: financial_points(answers, &mut findings),
    };

    (points, findings)
}

fn personal_points(
    answers: &AnswerRecord,
    policy: &ScoringPolicy,
    findings: &mut Findings,
) -> i32 {
    let mut points = 0;

    if let Some(age) = answers.age {
        points += match age {
            25..=35 => {
                findings.strength("Optimal age range for visa applications");
                10
            }
            18..=24 => 8,
            36..=45 => 6,
            _ => {
                findings.weakness("Age may impact certain visa categories");
                3
            }
        };
    }

    if policy.is_high_demand_country(&answers.target_country) {
        points += 10;
    } else if !answers.target_country.is_empty() {
        points += 7;
    }

    let manageable_household = !answers.has_dependents
        || answers
            .dependents_count
            .map(|count| count <= 2)
            .unwrap_or(false);
    if manageable_household {
        points += 5;
    } else {
        points += 2;
        findings.weakness("Multiple dependents may complicate application");
    }

    points + CURRENT_LOCATION_BASELINE
}

fn education_points(
    answers: &AnswerRecord,
    policy: &ScoringPolicy,
    findings: &mut Findings,
) -> i32 {
    let mut points = match answers.education_level {
        EducationLevel::Phd => 15,
        EducationLevel::Master => 12,
        EducationLevel::Bachelor => 9,
        EducationLevel::HighSchool => 5,
        EducationLevel::Other => 3,
        EducationLevel::Unrecognized => 5,
    };

    match answers.education_level {
        EducationLevel::Phd | EducationLevel::Master => {
            findings.strength("Strong educational background")
        }
        EducationLevel::HighSchool | EducationLevel::Other => {
            findings.weakness("Higher education would strengthen your profile")
        }
        EducationLevel::Bachelor | EducationLevel::Unrecognized => {}
    }

    if policy.is_stem_field(&answers.field_of_study) {
        points += 10;
        findings.strength("In-demand field of study (STEM)");
    } else if !answers.field_of_study.is_empty() {
        points += 6;
    }

    if let Some(years) = answers.years_of_experience {
        points += match years {
            5..=u32::MAX => {
                findings.strength("Extensive work experience");
                10
            }
            3..=4 => 7,
            1..=2 => 4,
            0 => {
                findings.weakness("Limited work experience");
                2
            }
        };
    }

    points
}

fn qualification_points(answers: &AnswerRecord, findings: &mut Findings) -> i32 {
    let mut points = 0;

    match (answers.english_test.was_taken(), answers.english_score) {
        (true, Some(score)) => {
            points += if score >= 7.5 {
                findings.strength("Excellent English proficiency");
                15
            } else if score >= 6.5 {
                findings.strength("Very good English proficiency");
                12
            } else if score >= 6.0 {
                findings.strength("Good English proficiency");
                10
            } else {
                findings.weakness("Improving English test score would help");
                5
            };
        }
        (true, None) => points += 7,
        (false, _) => findings.weakness("English language test required for most visas"),
    }

    if answers.previous_visa_applications {
        if let Some(approvals) = answers.previous_approvals.filter(|count| *count > 0) {
            points += history_adjustment(approvals);
            findings.strength("Positive previous visa history");
        }

        if let Some(refusals) = answers.previous_refusals.filter(|count| *count > 0) {
            points -= history_adjustment(refusals);
            // A single refusal costs points but is not called out.
            if refusals > 1 {
                findings.weakness("Multiple visa refusals may need addressing");
            }
        }
    }

    match answers.has_job_offer {
        JobOfferStatus::Yes => {
            points += 10;
            findings.strength("Job offer significantly boosts chances");
        }
        JobOfferStatus::NotYet => points += 5,
        JobOfferStatus::No => findings.weakness("Job offer would strengthen application"),
    }

    points
}

fn history_adjustment(count: u32) -> i32 {
    count.saturating_mul(2).min(MAX_HISTORY_ADJUSTMENT) as i32
}

fn financial_points(answers: &AnswerRecord, findings: &mut Findings) -> i32 {
    let resources = match answers.financial_resources {
        FinancialResources::Over50k => 6,
        FinancialResources::From30kTo50k => 4,
        FinancialResources::From15kTo30k => 3,
        FinancialResources::From5kTo15k => 2,
        FinancialResources::Under5k => 1,
        FinancialResources::Unrecognized => 3,
    };

    let timeline = match answers.timeline {
        Timeline::Flexible | Timeline::OneToTwoYears => 4,
        Timeline::SixToTwelveMonths => 3,
        Timeline::Immediate | Timeline::ThreeToSixMonths => 2,
    };

    match answers.financial_resources {
        FinancialResources::Over50k | FinancialResources::From30kTo50k => {
            findings.strength("Strong financial position")
        }
        FinancialResources::Under5k | FinancialResources::From5kTo15k => {
            findings.weakness("Financial resources may need improvement")
        }
        FinancialResources::From15kTo30k | FinancialResources::Unrecognized => {}
    }

    resources + timeline
}
