//! Greenhouse application forms (`*.greenhouse.io`).
//!
//! Greenhouse renders stable ids and `job_application[...]` input names,
//! so resolution is a straight selector table. The resume summary doubles
//! as the cover letter.

use std::collections::HashSet;

use async_trait::async_trait;

use cvfill_core::{FillOptions, ResumeDocument};
use cvfill_driver::{PageLocation, Session};

use crate::consent;
use crate::error::FillError;
use crate::fields::fill_chain;
use crate::sites::SiteIntegration;

const FORM_MARKER: &str = "#application_form";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreenhouseForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin_url: String,
    pub github_url: String,
    pub website_url: String,
    pub cover_letter: String,
}

#[must_use]
pub fn map_form(resume: &ResumeDocument, options: &FillOptions) -> GreenhouseForm {
    GreenhouseForm {
        first_name: resume.first_name(),
        last_name: resume.last_name(),
        email: resume.basics.email.clone().unwrap_or_default(),
        phone: resume.basics.phone.clone().unwrap_or_default(),
        location: resume
            .basics
            .location
            .as_ref()
            .and_then(|l| l.city.clone())
            .unwrap_or_default(),
        linkedin_url: resume
            .profile_url(&["linkedin"])
            .unwrap_or_default()
            .to_string(),
        github_url: resume
            .profile_url(&["github"])
            .unwrap_or_default()
            .to_string(),
        website_url: resume.basics.url.clone().unwrap_or_default(),
        cover_letter: options
            .cover_letter
            .clone()
            .or_else(|| resume.basics.summary.clone())
            .unwrap_or_default(),
    }
}

pub struct Greenhouse;

#[async_trait]
impl SiteIntegration for Greenhouse {
    fn name(&self) -> &'static str {
        "Greenhouse"
    }

    fn matches_location(&self, location: &PageLocation) -> bool {
        location.host_matches("greenhouse.io") && location.path.contains("/jobs/")
    }

    async fn detect(&self, session: &Session) -> Result<bool, FillError> {
        let location = session.page_location().await?;
        if !location.host_matches("greenhouse.io") {
            return Ok(false);
        }
        if location.path.contains("/jobs/") {
            return Ok(true);
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
        let mut written = HashSet::new();
        let mut filled = 0;

        let fields: [(&[&str], &str); 9] = [
            (
                &[
                    "input#first_name",
                    "input[name=\"job_application[first_name]\"]",
                ],
                &form.first_name,
            ),
            (
                &[
                    "input#last_name",
                    "input[name=\"job_application[last_name]\"]",
                ],
                &form.last_name,
            ),
            (
                &[
                    "input#email",
                    "input[name=\"job_application[email]\"]",
                    "input[type=\"email\"]",
                ],
                &form.email,
            ),
            (
                &[
                    "input#phone",
                    "input[name=\"job_application[phone]\"]",
                    "input[type=\"tel\"]",
                ],
                &form.phone,
            ),
            (
                &[
                    "input#location",
                    "input[name=\"job_application[location]\"]",
                ],
                &form.location,
            ),
            (
                &[
                    "input[name=\"job_application[linkedin_url]\"]",
                    "input[placeholder*=\"LinkedIn\"]",
                ],
                &form.linkedin_url,
            ),
            (
                &[
                    "input[name=\"job_application[github_url]\"]",
                    "input[placeholder*=\"GitHub\"]",
                ],
                &form.github_url,
            ),
            (
                &[
                    "input[name=\"job_application[website]\"]",
                    "input[placeholder*=\"Website\"]",
                ],
                &form.website_url,
            ),
            (
                &[
                    "textarea#cover_letter_text",
                    "textarea[name=\"job_application[cover_letter_text]\"]",
                ],
                &form.cover_letter,
            ),
        ];
        for (selectors, value) in fields {
            if fill_chain(session, &mut written, selectors, &[], value).await? {
                filled += 1;
            }
        }

        filled += consent::check_consent_boxes(session, None).await?;

        tracing::debug!(filled, "Greenhouse form filled");
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvfill_core::resume::{Basics, Profile};

    #[test]
    fn summary_becomes_cover_letter_unless_overridden() {
        let resume = ResumeDocument {
            basics: Basics {
                name: Some("Anna Kowalska".to_string()),
                summary: Some("Ten years of backend work.".to_string()),
                profiles: vec![Profile {
                    network: Some("GitHub".to_string()),
                    url: Some("https://github.com/anna".to_string()),
                }],
                ..Basics::default()
            },
            ..ResumeDocument::default()
        };
        let form = map_form(&resume, &FillOptions::default());
        assert_eq!(form.cover_letter, "Ten years of backend work.");
        assert_eq!(form.github_url, "https://github.com/anna");

        let overridden = map_form(
            &resume,
            &FillOptions {
                cover_letter: Some("Dear team".to_string()),
                ..FillOptions::default()
            },
        );
        assert_eq!(overridden.cover_letter, "Dear team");
    }

    #[test]
    fn location_requires_host_and_jobs_path() {
        let site = Greenhouse;
        assert!(site.matches_location(&PageLocation::parse(
            "https://boards.greenhouse.io/acme/jobs/123"
        )));
        assert!(!site.matches_location(&PageLocation::parse("https://boards.greenhouse.io/acme")));
        assert!(!site.matches_location(&PageLocation::parse("https://example.com/jobs/123")));
    }
}
