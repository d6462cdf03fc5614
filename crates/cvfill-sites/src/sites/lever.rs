//! Lever application forms (`jobs.lever.co/*/apply`).
//!
//! Lever posts use a single full-name input and `urls[...]`-named link
//! fields. The page hydrates after load, so the filler waits before the
//! first lookup.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;

use cvfill_core::{FillOptions, ResumeDocument};
use cvfill_driver::{PageLocation, Session};

use crate::consent;
use crate::error::FillError;
use crate::fields::fill_chain;
use crate::sites::SiteIntegration;

const FORM_MARKER: &str = "form[action*=\"/apply\"] input[name=\"email\"]";
const SETTLE_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeverForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub current_company: String,
    pub linkedin_url: String,
    pub github_url: String,
    pub portfolio_url: String,
    pub comments: String,
}

#[must_use]
pub fn map_form(resume: &ResumeDocument, options: &FillOptions) -> LeverForm {
    LeverForm {
        full_name: resume.full_name().to_string(),
        email: resume.basics.email.clone().unwrap_or_default(),
        phone: resume.basics.phone.clone().unwrap_or_default(),
        current_company: resume
            .work
            .first()
            .and_then(|w| w.name.clone())
            .unwrap_or_default(),
        linkedin_url: resume
            .profile_url(&["linkedin"])
            .unwrap_or_default()
            .to_string(),
        github_url: resume
            .profile_url(&["github"])
            .unwrap_or_default()
            .to_string(),
        portfolio_url: resume.basics.url.clone().unwrap_or_default(),
        comments: options
            .cover_letter
            .clone()
            .or_else(|| resume.basics.summary.clone())
            .unwrap_or_default(),
    }
}

pub struct Lever;

#[async_trait]
impl SiteIntegration for Lever {
    fn name(&self) -> &'static str {
        "Lever"
    }

    fn matches_location(&self, location: &PageLocation) -> bool {
        location.host_matches("jobs.lever.co") && location.path.contains("/apply")
    }

    async fn detect(&self, session: &Session) -> Result<bool, FillError> {
        let location = session.page_location().await?;
        if !location.host_matches("jobs.lever.co") {
            return Ok(false);
        }
        if location.path.contains("/apply") {
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
        tokio::time::sleep(SETTLE_DELAY).await;

        let mut written = HashSet::new();
        let mut filled = 0;

        let fields: [(&[&str], &[&str], &str); 8] = [
            (
                &["input[name=\"name\"]", "input#name"],
                &["full name", "name"],
                &form.full_name,
            ),
            (
                &["input[name=\"email\"]", "input#email", "input[type=\"email\"]"],
                &["email", "e-mail"],
                &form.email,
            ),
            (
                &["input[name=\"phone\"]", "input#phone", "input[type=\"tel\"]"],
                &["phone", "telefon", "mobile"],
                &form.phone,
            ),
            (
                &["input[name=\"org\"]", "input[name=\"currentCompany\"]"],
                &["current company", "company", "organization"],
                &form.current_company,
            ),
            (
                &["input[name=\"urls[LinkedIn]\"]", "input[data-source=\"LinkedIn\"]"],
                &["linkedin"],
                &form.linkedin_url,
            ),
            (
                &["input[name=\"urls[GitHub]\"]", "input[data-source=\"GitHub\"]"],
                &["github"],
                &form.github_url,
            ),
            (
                &[
                    "input[name=\"urls[Portfolio]\"]",
                    "input[name=\"urls[Website]\"]",
                    "input[name=\"urls[Other]\"]",
                ],
                &["portfolio", "website"],
                &form.portfolio_url,
            ),
            (
                &["textarea[name=\"comments\"]", "textarea#comments"],
                &["additional", "cover letter", "comments"],
                &form.comments,
            ),
        ];
        for (selectors, labels, value) in fields {
            if fill_chain(session, &mut written, selectors, labels, value).await? {
                filled += 1;
            }
        }

        filled += consent::check_consent_boxes(session, None).await?;

        tracing::debug!(filled, "Lever form filled");
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvfill_core::resume::{Basics, WorkEntry};

    #[test]
    fn current_company_comes_from_first_work_entry() {
        let resume = ResumeDocument {
            basics: Basics {
                name: Some("Anna Kowalska".to_string()),
                ..Basics::default()
            },
            work: vec![
                WorkEntry {
                    name: Some("Acme".to_string()),
                    ..WorkEntry::default()
                },
                WorkEntry {
                    name: Some("Globex".to_string()),
                    ..WorkEntry::default()
                },
            ],
            ..ResumeDocument::default()
        };
        let form = map_form(&resume, &FillOptions::default());
        assert_eq!(form.full_name, "Anna Kowalska");
        assert_eq!(form.current_company, "Acme");
    }

    #[test]
    fn apply_path_on_lever_host_matches() {
        let site = Lever;
        assert!(site.matches_location(&PageLocation::parse("https://jobs.lever.co/acme/apply")));
        assert!(site.matches_location(&PageLocation::parse(
            "https://jobs.lever.co/acme/4f2e-11d3/apply?lever-source=x"
        )));
        assert!(!site.matches_location(&PageLocation::parse("https://jobs.lever.co/acme/4f2e")));
        assert!(!site.matches_location(&PageLocation::parse("https://example.com/apply")));
    }

    #[test]
    fn mapping_is_pure() {
        let resume = ResumeDocument::default();
        let options = FillOptions::default();
        assert_eq!(map_form(&resume, &options), map_form(&resume, &options));
    }
}
