//! SOLID.jobs enrollment forms.
//!
//! Angular Material layout: the text inputs sit inside `mat-form-field`
//! wrappers in a fixed order (name, email, phone, salary, availability,
//! message, LinkedIn) and the two `mat-select` dropdowns (employment
//! type, salary currency) open an overlay of `mat-option` elements.

use async_trait::async_trait;

use cvfill_core::{FillOptions, ResumeDocument};
use cvfill_driver::{PageLocation, Session};

use crate::consent;
use crate::error::FillError;
use crate::fields::select_overlay_option;
use crate::render::render_resume_text;
use crate::sites::SiteIntegration;

const FORM_MARKER: &str = "#enrollForm";
const ORDERED_INPUTS: &str =
    "#enrollForm mat-form-field input:not([type=\"checkbox\"]), #enrollForm mat-form-field textarea";
const SELECTS: &str = "#enrollForm mat-select";
const OVERLAY_OPTIONS: &str = "mat-option";
const DEFAULT_CURRENCY: &str = "PLN netto";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolidJobsForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub employment_type: String,
    pub expected_salary: String,
    pub salary_currency: String,
    pub availability_date: String,
    pub cover_letter: String,
    pub linkedin_url: String,
    pub cv_text: String,
}

#[must_use]
pub fn map_form(resume: &ResumeDocument, options: &FillOptions) -> SolidJobsForm {
    SolidJobsForm {
        full_name: resume.full_name().to_string(),
        email: resume.basics.email.clone().unwrap_or_default(),
        phone: resume.basics.phone.clone().unwrap_or_default(),
        employment_type: options
            .employment_type
            .clone()
            .unwrap_or_else(|| "B2B".to_string()),
        expected_salary: options.expected_salary.clone().unwrap_or_default(),
        salary_currency: options
            .salary_currency
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        availability_date: options
            .availability_date
            .clone()
            .unwrap_or_else(|| "Natychmiast".to_string()),
        cover_letter: options.cover_letter.clone().unwrap_or_default(),
        linkedin_url: resume
            .profile_url(&["linkedin"])
            .unwrap_or_default()
            .to_string(),
        cv_text: render_resume_text(resume),
    }
}

pub struct SolidJobs;

#[async_trait]
impl SiteIntegration for SolidJobs {
    fn name(&self) -> &'static str {
        "SOLID.jobs"
    }

    fn matches_location(&self, location: &PageLocation) -> bool {
        location.host_matches("solid.jobs")
    }

    async fn detect(&self, session: &Session) -> Result<bool, FillError> {
        if !self.matches_location(&session.page_location().await?) {
            return Ok(false);
        }
        Ok(session.find(FORM_MARKER).await?.is_some())
    }

    async fn fill(
        &self,
        session: &Session,
        resume: &ResumeDocument,
        options: &FillOptions,
    ) -> Result<u32, FillError> {
        let form = map_form(resume, options);
        let mut filled = 0;

        // The message textarea carries the whole resume as text; an
        // explicit cover letter replaces it.
        let message = if form.cover_letter.is_empty() {
            &form.cv_text
        } else {
            &form.cover_letter
        };

        let inputs = session.find_all(ORDERED_INPUTS).await?;
        let ordered_values = [
            &form.full_name,
            &form.email,
            &form.phone,
            &form.expected_salary,
            &form.availability_date,
            message,
            &form.linkedin_url,
        ];
        for (index, value) in ordered_values.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            if let Some(element) = inputs.get(index) {
                session.fill_field(element, value).await?;
                filled += 1;
            }
        }

        let selects = session.find_all(SELECTS).await?;
        if let Some(trigger) = selects.first() {
            if select_overlay_option(session, trigger, OVERLAY_OPTIONS, &form.employment_type)
                .await?
            {
                filled += 1;
            }
        }
        if let Some(trigger) = selects.get(1) {
            if select_overlay_option(session, trigger, OVERLAY_OPTIONS, &form.salary_currency)
                .await?
            {
                filled += 1;
            }
        }

        filled += consent::check_all_boxes(session, Some(FORM_MARKER)).await?;

        tracing::debug!(filled, "SOLID.jobs form filled");
        Ok(filled)
    }
}
