use crate::infra::TracingLeadSink;
use chrono::Utc;
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use visa_compass::config::AppConfig;
use visa_compass::error::AppError;
use visa_compass::workflows::calculator::{
    Assessment, CalculatorConfig, CalculatorService, EducationLevel, EmploymentStatus, EnglishTest,
    FinancialResources, InMemoryProgressStore, JobOfferStatus, MaritalStatus, ProgressStore,
    SessionId, Timeline, VisaType, WizardDraft, WizardStep,
};
use visa_compass::workflows::leads::{LeadApplication, LeadService};

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding wizard answers, either bare or wrapped in {"answers": ...}
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the assessment as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the consultation lead portion of the demo.
    #[arg(long)]
    pub(crate) skip_lead: bool,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs { input, json } = args;

    let raw = std::fs::read_to_string(&input)?;
    let draft = parse_answers(&raw)?;
    let config = AppConfig::load()?;
    let service = CalculatorService::new(
        Arc::new(InMemoryProgressStore::default()),
        config.calculator,
    );

    let assessment = service.assess(&draft)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        println!("Assessment for {}", input.display());
        render_assessment(&assessment);
    }
    Ok(())
}

/// Accept either the bare wizard answers or the assessment request envelope.
pub(crate) fn parse_answers(raw: &str) -> Result<WizardDraft, AppError> {
    let value: Value = serde_json::from_str(raw)?;
    let answers = match value {
        Value::Object(mut envelope) if envelope.contains_key("answers") => {
            envelope.remove("answers").unwrap_or_default()
        }
        other => other,
    };
    Ok(serde_json::from_value(answers)?)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { skip_lead } = args;

    println!("Visa probability calculator demo");
    let store = Arc::new(InMemoryProgressStore::default());
    let service = CalculatorService::new(store.clone(), CalculatorConfig::default());

    for (label, draft) in demo_profiles() {
        println!("\n== {label} ==");
        let session = SessionId(format!("demo-{}", label.to_ascii_lowercase()));

        let autosave = service
            .save_progress(&session, draft.clone(), WizardStep::FinancialTimeline, Utc::now())
            .and_then(|()| service.restore_progress(&session, Utc::now()));
        match autosave {
            Ok(Some(saved)) => println!(
                "- Autosaved at step {} of {}",
                saved.step.index() + 1,
                WizardStep::ALL.len()
            ),
            Ok(None) => println!("- Autosave skipped (empty draft)"),
            Err(err) => println!("- Autosave unavailable: {}", err),
        }

        match service.assess_session(&session, &draft) {
            Ok(assessment) => render_assessment(&assessment),
            Err(err) => {
                println!("  Assessment rejected: {}", err);
                continue;
            }
        }

        let cleared = matches!(store.load(&session), Ok(None));
        println!("- Saved progress cleared after results: {}", cleared);
    }

    if skip_lead {
        return Ok(());
    }

    println!("\nConsultation lead intake (contact details redacted)");
    let leads = LeadService::new(Arc::new(TracingLeadSink));
    match leads.submit(demo_lead(), Utc::now()) {
        Ok(receipt) => println!(
            "- Lead {} -> status {}",
            receipt.reference.0, receipt.status
        ),
        Err(err) => println!("- Lead rejected: {}", err),
    }

    Ok(())
}

pub(crate) fn render_assessment(assessment: &Assessment) {
    let result = &assessment.result;
    println!(
        "Visa probability: {}/100 ({})",
        result.total_score,
        result.probability.label()
    );
    let scores = &result.category_scores;
    println!(
        "  Category scores: personal {} | education {} | qualifications {} | financial {}",
        scores.personal, scores.education, scores.qualifications, scores.financial
    );

    if !result.strengths.is_empty() {
        println!("  Strengths:");
        for strength in &result.strengths {
            println!("    + {}", strength);
        }
    }
    if !result.weaknesses.is_empty() {
        println!("  Areas to improve:");
        for weakness in &result.weaknesses {
            println!("    - {}", weakness);
        }
    }

    println!("  Recommendations:");
    for (index, recommendation) in assessment.recommendations.iter().enumerate() {
        let action = recommendation
            .action
            .as_deref()
            .map(|action| format!(" [{action}]"))
            .unwrap_or_default();
        println!(
            "    {}. ({:?}) {}{}",
            index + 1,
            recommendation.priority,
            recommendation.title,
            action
        );
        println!("       {}", recommendation.description);
    }
}

fn demo_profiles() -> Vec<(&'static str, WizardDraft)> {
    let strong = WizardDraft {
        current_country: Some("India".to_string()),
        citizenship: Some("Indian".to_string()),
        target_country: Some("Canada".to_string()),
        age: Some(30),
        marital_status: Some(MaritalStatus::Single),
        has_dependents: Some(false),
        dependents_count: None,
        education_level: Some(EducationLevel::Master),
        field_of_study: Some("Computer Science".to_string()),
        years_of_experience: Some(6),
        work_domain: Some("Software".to_string()),
        employment_status: Some(EmploymentStatus::Employed),
        annual_income: Some("50k-75k".to_string()),
        english_test: Some(EnglishTest::Ielts),
        english_score: Some(8.0),
        other_languages: Some(vec!["Hindi".to_string()]),
        visa_type: Some(VisaType::Skilled),
        previous_visa_applications: Some(false),
        previous_approvals: None,
        previous_refusals: None,
        has_job_offer: Some(JobOfferStatus::Yes),
        financial_resources: Some(FinancialResources::Over50k),
        timeline: Some(Timeline::Flexible),
        has_family_in_target: Some(false),
        additional_info: None,
    };

    let developing = WizardDraft {
        current_country: Some("Vietnam".to_string()),
        citizenship: Some("Vietnamese".to_string()),
        target_country: Some("Japan".to_string()),
        age: Some(50),
        marital_status: Some(MaritalStatus::Married),
        has_dependents: Some(true),
        dependents_count: Some(3),
        education_level: Some(EducationLevel::HighSchool),
        field_of_study: Some("General studies".to_string()),
        years_of_experience: Some(0),
        work_domain: Some("Retail".to_string()),
        employment_status: Some(EmploymentStatus::Unemployed),
        annual_income: Some("<10k".to_string()),
        english_test: Some(EnglishTest::None),
        has_job_offer: Some(JobOfferStatus::No),
        financial_resources: Some(FinancialResources::Under5k),
        timeline: Some(Timeline::Immediate),
        has_family_in_target: Some(false),
        visa_type: Some(VisaType::Work),
        previous_visa_applications: Some(false),
        ..WizardDraft::default()
    };

    let refused = WizardDraft {
        previous_visa_applications: Some(true),
        previous_approvals: Some(2),
        previous_refusals: Some(3),
        ..strong.clone()
    };

    vec![
        ("Strong", strong),
        ("Developing", developing),
        ("Refused", refused),
    ]
}

fn demo_lead() -> LeadApplication {
    LeadApplication {
        full_name: "Demo Applicant".to_string(),
        email: "applicant@example.com".to_string(),
        phone: "+1 555 010 0000".to_string(),
        date_of_birth: "1994-01-01".to_string(),
        nationality: "Indian".to_string(),
        current_location: "Pune".to_string(),
        education: "master".to_string(),
        field_of_study: "Computer Science".to_string(),
        experience: "5+".to_string(),
        occupation: "Software engineer".to_string(),
        skills: "Rust, distributed systems".to_string(),
        languages: vec!["English".to_string(), "Hindi".to_string()],
        destination: "Canada".to_string(),
        purpose: "work".to_string(),
        timeline: "6-12months".to_string(),
        additional_info: None,
        terms: true,
        privacy: true,
    }
}
