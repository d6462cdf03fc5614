//! eRecruiter application forms (`form.erecruiter.pl`).
//!
//! The form is server rendered with stable but opaque WebForms control
//! ids; those ids are kept in one table here so a markup change only
//! touches this module. Questions the resume does not answer fall back
//! to the `x-` extension fields, then caller options, then the Polish
//! defaults the form expects.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use cvfill_core::{FillOptions, ResumeDocument};
use cvfill_driver::{PageLocation, Session};

use crate::consent;
use crate::error::FillError;
use crate::fields::{fill_chain, find_by_label, select_native_option};
use crate::sites::SiteIntegration;

// WebForms control ids observed on the hosted form.
const SALARY_INPUT: &str = "#ctl00_DefaultContent_ctl62_tbText";
const CONTRACT_SELECT: &str = "#ctl00_DefaultContent_ctl61_dlstOptions";
const POLISH_SELECT: &str = "#ctl00_DefaultContent_ctl63_dlstOptions";
const ENGLISH_SELECT: &str = "#ctl00_DefaultContent_ctl64_dlstOptions";
const AVAILABILITY_LABELS: &str = "label[for^=\"ctl00_DefaultContent_ctl60_lstOptions_\"]";
const DATA_CONSENT_ID: &str = "#ctl00_DefaultContent_rptAllConsents_ctl00_cbxConsent";
const FUTURE_RECRUITMENT_CONSENT_ID: &str =
    "#ctl00_DefaultContent_rptAllConsents_ctl01_cbxConsent";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ERecruiterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub city: String,
    pub linkedin_url: String,
    pub availability: String,
    pub contract_type: String,
    pub expected_salary: String,
    pub polish_level: String,
    pub english_level: String,
    pub experience_years: u32,
    /// Whether to tick the optional future-recruitment consent.
    pub agree_to_future_recruitment: bool,
}

#[must_use]
pub fn map_form(
    resume: &ResumeDocument,
    options: &FillOptions,
    today: chrono::NaiveDate,
) -> ERecruiterForm {
    let basics = &resume.basics;
    let location = basics.location.as_ref();
    ERecruiterForm {
        first_name: resume.first_name(),
        last_name: resume.last_name(),
        email: basics.email.clone().unwrap_or_default(),
        phone: basics.phone.clone().unwrap_or_default(),
        country: location
            .and_then(|l| l.country.clone())
            .unwrap_or_else(|| "Polska".to_string()),
        city: location
            .and_then(|l| l.city.clone().or_else(|| l.address.clone()))
            .unwrap_or_default(),
        linkedin_url: resume
            .profile_url(&["linkedin"])
            .unwrap_or_default()
            .to_string(),
        availability: basics
            .x_availability
            .clone()
            .or_else(|| options.availability_date.clone())
            .unwrap_or_else(|| "natychmiast".to_string()),
        contract_type: basics
            .x_preferred_contract_type
            .clone()
            .or_else(|| options.contract_type.clone())
            .unwrap_or_else(|| "B2B".to_string()),
        expected_salary: basics
            .x_expected_salary
            .clone()
            .or_else(|| options.expected_salary.clone())
            .unwrap_or_default(),
        polish_level: basics
            .x_language_skills
            .as_ref()
            .and_then(|l| l.polish.clone())
            .or_else(|| options.polish_level.clone())
            .unwrap_or_else(|| "język ojczysty".to_string()),
        english_level: basics
            .x_language_skills
            .as_ref()
            .and_then(|l| l.english.clone())
            .or_else(|| options.english_level.clone())
            .unwrap_or_else(|| "dobra".to_string()),
        experience_years: resume.experience_years(today),
        agree_to_future_recruitment: options.agree_to_future_recruitment.unwrap_or(true),
    }
}

/// Option-text bucket the form offers for a given experience figure.
#[must_use]
pub fn experience_bucket(years: u32) -> Option<&'static str> {
    match years {
        0 => None,
        1 => Some("1 rok"),
        2 | 3 => Some("2 - 3"),
        4 => Some("4 - 5"),
        _ => Some("więcej"),
    }
}

pub struct ERecruiter;

#[async_trait]
impl SiteIntegration for ERecruiter {
    fn name(&self) -> &'static str {
        "eRecruiter"
    }

    fn matches_location(&self, location: &PageLocation) -> bool {
        location.host_matches("erecruiter.pl")
    }

    async fn detect(&self, session: &Session) -> Result<bool, FillError> {
        if !self.matches_location(&session.page_location().await?) {
            return Ok(false);
        }
        Ok(session.find("form").await?.is_some())
    }

    async fn fill(
        &self,
        session: &Session,
        resume: &ResumeDocument,
        options: &FillOptions,
    ) -> Result<u32, FillError> {
        let form = map_form(resume, options, Utc::now().date_naive());
        let mut written = HashSet::new();
        let mut filled = 0;

        let text_fields: [(&[&str], &[&str], &str); 6] = [
            (
                &["input[name*=\"first\" i]"],
                &["imię", "first name"],
                &form.first_name,
            ),
            (
                &["input[name*=\"last\" i]"],
                &["nazwisko", "last name", "surname"],
                &form.last_name,
            ),
            (
                &["input[type=\"email\"]", "input[name*=\"email\" i]"],
                &["email", "e-mail"],
                &form.email,
            ),
            (
                &["input[type=\"tel\"]", "input[name*=\"phone\" i]"],
                &["telefon", "phone", "numer"],
                &form.phone,
            ),
            (
                &["input[name*=\"city\" i]", "input[name*=\"miasto\" i]"],
                &["miasto", "city"],
                &form.city,
            ),
            (
                &["input[name*=\"linkedin\" i]"],
                &["linkedin", "profil"],
                &form.linkedin_url,
            ),
        ];
        for (selectors, labels, value) in text_fields {
            if fill_chain(session, &mut written, selectors, labels, value).await? {
                filled += 1;
            }
        }

        if let Some(select) = find_by_label(session, &["kraj", "country"]).await? {
            if select_native_option(session, &select, &form.country).await? {
                filled += 1;
            }
        }

        if fill_chain(
            session,
            &mut written,
            &[SALARY_INPUT],
            &["oczekiwania finansowe", "salary", "wynagrodzenie"],
            &form.expected_salary,
        )
        .await?
        {
            filled += 1;
        }

        // Availability is a checkbox group: pick the option whose label
        // text matches.
        if self
            .pick_availability(session, &form.availability)
            .await?
        {
            filled += 1;
        }

        for (selector, wanted) in [
            (CONTRACT_SELECT, form.contract_type.as_str()),
            (POLISH_SELECT, form.polish_level.as_str()),
            (ENGLISH_SELECT, form.english_level.as_str()),
        ] {
            if let Some(select) = session.find(selector).await? {
                if select_native_option(session, &select, wanted).await? {
                    filled += 1;
                }
            }
        }

        if let Some(bucket) = experience_bucket(form.experience_years) {
            if let Some(select) =
                find_by_label(session, &["lat doświadczenia", "experience"]).await?
            {
                if select_native_option(session, &select, bucket).await? {
                    filled += 1;
                }
            }
        }

        let consent_targets = [
            (DATA_CONSENT_ID, true),
            (
                FUTURE_RECRUITMENT_CONSENT_ID,
                form.agree_to_future_recruitment,
            ),
        ];
        for (selector, wanted) in consent_targets {
            if !wanted {
                continue;
            }
            if let Some(checkbox) = session.find(selector).await? {
                let checked = session
                    .property(&checkbox, "checked")
                    .await?
                    .as_bool()
                    .unwrap_or(false);
                if !checked {
                    session.click(&checkbox).await?;
                    filled += 1;
                }
            }
        }
        filled += consent::check_consent_boxes(session, Some("form")).await?;

        tracing::debug!(filled, "eRecruiter form filled");
        Ok(filled)
    }
}

impl ERecruiter {
    async fn pick_availability(
        &self,
        session: &Session,
        availability: &str,
    ) -> Result<bool, FillError> {
        let wanted = availability.to_lowercase();
        for label in session.find_all(AVAILABILITY_LABELS).await? {
            let text = session.text(&label).await?;
            if !text.to_lowercase().contains(&wanted) {
                continue;
            }
            let target = session.property(&label, "htmlFor").await?;
            let Value::String(id) = target else {
                continue;
            };
            if let Some(checkbox) = session.find(&format!("[id=\"{id}\"]")).await? {
                session.click(&checkbox).await?;
                return Ok(true);
            }
        }
        Ok(false)
    }
}
