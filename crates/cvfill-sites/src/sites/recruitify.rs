//! Recruitify application forms (`*.recruitify.ai`).
//!
//! Fields are resolved through selector tables with English and Polish
//! placeholder variants, then by label text for forms that render
//! placeholder-less inputs.

use std::collections::HashSet;

use async_trait::async_trait;

use cvfill_core::{FillOptions, ResumeDocument};
use cvfill_driver::{PageLocation, Session};

use crate::consent;
use crate::error::FillError;
use crate::fields::fill_chain;
use crate::sites::SiteIntegration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecruitifyForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub linkedin_url: String,
    pub website_url: String,
    pub summary: String,
    pub expected_salary: String,
    pub availability: String,
}

#[must_use]
pub fn map_form(resume: &ResumeDocument, options: &FillOptions) -> RecruitifyForm {
    RecruitifyForm {
        first_name: resume.first_name(),
        last_name: resume.last_name(),
        email: resume.basics.email.clone().unwrap_or_default(),
        phone: resume.basics.phone.clone().unwrap_or_default(),
        city: resume
            .basics
            .location
            .as_ref()
            .and_then(|l| l.city.clone())
            .unwrap_or_default(),
        linkedin_url: resume
            .profile_url(&["linkedin"])
            .unwrap_or_default()
            .to_string(),
        website_url: resume.basics.url.clone().unwrap_or_default(),
        summary: resume.basics.summary.clone().unwrap_or_default(),
        expected_salary: options.expected_salary.clone().unwrap_or_default(),
        availability: options
            .availability_date
            .clone()
            .unwrap_or_else(|| "Immediately".to_string()),
    }
}

pub struct Recruitify;

#[async_trait]
impl SiteIntegration for Recruitify {
    fn name(&self) -> &'static str {
        "Recruitify"
    }

    fn matches_location(&self, location: &PageLocation) -> bool {
        location.host_matches("recruitify.ai")
            && (location.path.contains("/job/") || location.path.contains("/apply"))
    }

    async fn fill(
        &self,
        session: &Session,
        resume: &ResumeDocument,
        options: &FillOptions,
    ) -> Result<u32, FillError> {
        let form = map_form(resume, options);
        let full_name = format!("{} {}", form.first_name, form.last_name);
        let mut written = HashSet::new();
        let mut filled = 0;

        let fields: [(&[&str], &[&str], &str); 10] = [
            (
                &[
                    "input[name=\"firstName\"]",
                    "input[placeholder*=\"First name\"]",
                    "input[placeholder*=\"Imię\"]",
                ],
                &["imię", "first name"],
                &form.first_name,
            ),
            (
                &[
                    "input[name=\"lastName\"]",
                    "input[placeholder*=\"Last name\"]",
                    "input[placeholder*=\"Nazwisko\"]",
                ],
                &["nazwisko", "last name"],
                &form.last_name,
            ),
            (
                &[
                    "input[name=\"name\"]",
                    "input[placeholder*=\"Full name\"]",
                    "input[placeholder*=\"Imię i nazwisko\"]",
                ],
                &["imię i nazwisko", "full name"],
                &full_name,
            ),
            (
                &[
                    "input[name=\"email\"]",
                    "input[type=\"email\"]",
                    "input[placeholder*=\"E-mail\"]",
                ],
                &["e-mail", "email"],
                &form.email,
            ),
            (
                &[
                    "input[name=\"phone\"]",
                    "input[type=\"tel\"]",
                    "input[placeholder*=\"Telefon\"]",
                ],
                &["telefon", "phone", "numer telefonu"],
                &form.phone,
            ),
            (
                &[
                    "input[name=\"city\"]",
                    "input[placeholder*=\"City\"]",
                    "input[placeholder*=\"Miasto\"]",
                ],
                &["miasto", "city"],
                &form.city,
            ),
            (
                &[
                    "input[name=\"linkedin\"]",
                    "input[name=\"linkedIn\"]",
                    "input[placeholder*=\"LinkedIn\"]",
                ],
                &["linkedin"],
                &form.linkedin_url,
            ),
            (
                &[
                    "input[name=\"website\"]",
                    "input[name=\"portfolio\"]",
                    "input[placeholder*=\"Website\"]",
                ],
                &["website", "portfolio"],
                &form.website_url,
            ),
            (
                &[
                    "input[placeholder*=\"notice\"]",
                    "input[placeholder*=\"availability\"]",
                    "input[placeholder*=\"wypowiedzenia\"]",
                    "input[placeholder*=\"Dostępność\"]",
                ],
                &["okres wypowiedzenia", "notice period", "dostępność", "availability"],
                &form.availability,
            ),
            (
                &[
                    "input[placeholder*=\"salary\"]",
                    "input[placeholder*=\"Salary\"]",
                    "input[placeholder*=\"wynagrodzenie\"]",
                    "input[placeholder*=\"stawka\"]",
                ],
                &["wynagrodzenie", "oczekiwania finansowe", "salary", "stawka"],
                &form.expected_salary,
            ),
        ];
        for (selectors, labels, value) in fields {
            if fill_chain(session, &mut written, selectors, labels, value).await? {
                filled += 1;
            }
        }

        if fill_chain(
            session,
            &mut written,
            &[
                "textarea[name=\"summary\"]",
                "textarea[name=\"coverLetter\"]",
                "textarea[placeholder*=\"about\"]",
            ],
            &["o sobie", "about"],
            &form.summary,
        )
        .await?
        {
            filled += 1;
        }

        filled += consent::check_consent_boxes(session, None).await?;

        tracing::debug!(filled, "Recruitify form filled");
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvfill_core::resume::Basics;

    #[test]
    fn maps_names_and_default_availability() {
        let resume = ResumeDocument {
            basics: Basics {
                name: Some("Anna Maria Kowalska".to_string()),
                ..Basics::default()
            },
            ..ResumeDocument::default()
        };
        let form = map_form(&resume, &FillOptions::default());
        assert_eq!(form.first_name, "Anna");
        assert_eq!(form.last_name, "Maria Kowalska");
        assert_eq!(form.availability, "Immediately");
    }

    #[test]
    fn location_requires_host_and_application_path() {
        let site = Recruitify;
        assert!(site.matches_location(&PageLocation::parse(
            "https://acme.recruitify.ai/job/backend-dev"
        )));
        assert!(site.matches_location(&PageLocation::parse(
            "https://acme.recruitify.ai/offers/1/apply"
        )));
        assert!(!site.matches_location(&PageLocation::parse("https://acme.recruitify.ai/about")));
        assert!(!site.matches_location(&PageLocation::parse("https://example.com/job/1")));
    }
}
