use super::domain::LeadApplication;
use crate::workflows::calculator::FieldViolation;

const MINIMUM_NAME_LENGTH: usize = 2;
const MINIMUM_PHONE_LENGTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("application form has {} invalid field(s)", .violations.len())]
pub struct LeadValidationError {
    pub violations: Vec<FieldViolation>,
}

/// Check an application form submission, trimming its text fields on success.
pub fn validate_lead(mut application: LeadApplication) -> Result<LeadApplication, LeadValidationError> {
    trim_fields(&mut application);
    let mut violations = Vec::new();
    let mut reject = |field: &str, message: &str| {
        violations.push(FieldViolation {
            field: field.to_string(),
            message: message.to_string(),
        })
    };

    if application.full_name.chars().count() < MINIMUM_NAME_LENGTH {
        reject("fullName", "Name must be at least 2 characters");
    }
    if !is_plausible_email(&application.email) {
        reject("email", "Invalid email address");
    }
    if application.phone.chars().count() < MINIMUM_PHONE_LENGTH {
        reject("phone", "Phone number must be at least 10 digits");
    }

    let required = [
        ("dateOfBirth", &application.date_of_birth, "Date of birth is required"),
        ("nationality", &application.nationality, "Nationality is required"),
        (
            "currentLocation",
            &application.current_location,
            "Current location is required",
        ),
        ("education", &application.education, "Education level is required"),
        ("fieldOfStudy", &application.field_of_study, "Field of study is required"),
        ("occupation", &application.occupation, "Occupation is required"),
        ("skills", &application.skills, "Skills are required"),
        ("destination", &application.destination, "Destination is required"),
        ("purpose", &application.purpose, "Purpose is required"),
        ("timeline", &application.timeline, "Timeline is required"),
    ];
    for (field, value, message) in required {
        if value.is_empty() {
            reject(field, message);
        }
    }

    if application.languages.iter().all(|language| language.is_empty()) {
        reject("languages", "Select at least one language");
    }
    if !application.terms {
        reject("terms", "You must accept the terms and conditions");
    }
    if !application.privacy {
        reject("privacy", "You must acknowledge the privacy policy");
    }

    if violations.is_empty() {
        Ok(application)
    } else {
        Err(LeadValidationError { violations })
    }
}

fn trim_fields(application: &mut LeadApplication) {
    for value in [
        &mut application.full_name,
        &mut application.email,
        &mut application.phone,
        &mut application.date_of_birth,
        &mut application.nationality,
        &mut application.current_location,
        &mut application.education,
        &mut application.field_of_study,
        &mut application.experience,
        &mut application.occupation,
        &mut application.skills,
        &mut application.destination,
        &mut application.purpose,
        &mut application.timeline,
    ] {
        *value = value.trim().to_string();
    }
    application.languages = application
        .languages
        .iter()
        .map(|language| language.trim().to_string())
        .filter(|language| !language.is_empty())
        .collect();
    application.additional_info = application
        .additional_info
        .take()
        .map(|info| info.trim().to_string())
        .filter(|info| !info.is_empty());
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split('.')
            .filter(|label| !label.is_empty())
            .count()
            >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
