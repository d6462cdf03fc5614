//! BambooHR career pages (`*.bamboohr.com`).
//!
//! BambooHR tenants keep fairly stable input names, but older themes fall
//! back to id fragments and label text, so every field carries both a
//! selector chain and label fallbacks.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;

use cvfill_core::{FillOptions, ResumeDocument};
use cvfill_driver::{PageLocation, Session};

use crate::consent;
use crate::error::FillError;
use crate::fields::fill_chain;
use crate::sites::SiteIntegration;

const SETTLE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BambooHrForm {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub linkedin_url: String,
    pub website_url: String,
    pub cover_letter: String,
}

#[must_use]
pub fn map_form(resume: &ResumeDocument, options: &FillOptions) -> BambooHrForm {
    let location = resume.basics.location.as_ref();
    BambooHrForm {
        first_name: resume.first_name(),
        last_name: resume.last_name(),
        full_name: resume.full_name().to_string(),
        email: resume.basics.email.clone().unwrap_or_default(),
        phone: resume.basics.phone.clone().unwrap_or_default(),
        address: location
            .and_then(|l| l.address.clone())
            .unwrap_or_default(),
        city: location.and_then(|l| l.city.clone()).unwrap_or_default(),
        state: location.and_then(|l| l.region.clone()).unwrap_or_default(),
        zip: location
            .and_then(|l| l.postal_code.clone())
            .unwrap_or_default(),
        linkedin_url: resume
            .profile_url(&["linkedin"])
            .unwrap_or_default()
            .to_string(),
        website_url: resume
            .basics
            .url
            .clone()
            .or_else(|| {
                resume
                    .profile_url(&["website", "portfolio"])
                    .map(ToString::to_string)
            })
            .unwrap_or_default(),
        cover_letter: options
            .cover_letter
            .clone()
            .or_else(|| resume.basics.summary.clone())
            .unwrap_or_default(),
    }
}

pub struct BambooHr;

#[async_trait]
impl SiteIntegration for BambooHr {
    fn name(&self) -> &'static str {
        "BambooHR"
    }

    fn matches_location(&self, location: &PageLocation) -> bool {
        location.host_matches("bamboohr.com")
            && (location.path.contains("/careers/") || location.path.contains("/jobs/"))
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

        let fields: [(&[&str], &[&str], &str); 12] = [
            (
                &["input[name=\"firstName\"]", "input[id*=\"firstName\"]"],
                &["first name", "imię"],
                &form.first_name,
            ),
            (
                &["input[name=\"lastName\"]", "input[id*=\"lastName\"]"],
                &["last name", "nazwisko"],
                &form.last_name,
            ),
            (
                &["input[name=\"fullName\"]", "input[id*=\"fullName\"]"],
                &["full name"],
                &form.full_name,
            ),
            (
                &["input[name=\"email\"]", "input[type=\"email\"]"],
                &["email", "e-mail"],
                &form.email,
            ),
            (
                &["input[name=\"phone\"]", "input[type=\"tel\"]"],
                &["phone", "telefon"],
                &form.phone,
            ),
            (
                &["input[name=\"address\"]", "input[id*=\"address\"]"],
                &["address", "street"],
                &form.address,
            ),
            (
                &["input[name=\"city\"]", "input[id*=\"city\"]"],
                &["city", "miasto"],
                &form.city,
            ),
            (
                &["input[name=\"state\"]", "input[id*=\"state\"]"],
                &["state", "province", "województwo"],
                &form.state,
            ),
            (
                &[
                    "input[name=\"zip\"]",
                    "input[name=\"zipCode\"]",
                    "input[name=\"postalCode\"]",
                ],
                &["zip", "postal"],
                &form.zip,
            ),
            (
                &["input[name=\"linkedinUrl\"]", "input[id*=\"linkedin\"]"],
                &["linkedin"],
                &form.linkedin_url,
            ),
            (
                &["input[name=\"websiteUrl\"]", "input[id*=\"website\"]"],
                &["website", "portfolio"],
                &form.website_url,
            ),
            (
                &[
                    "textarea[name=\"coverLetter\"]",
                    "textarea[id*=\"coverLetter\"]",
                    "textarea[name=\"message\"]",
                ],
                &["cover letter", "message"],
                &form.cover_letter,
            ),
        ];
        for (selectors, labels, value) in fields {
            if fill_chain(session, &mut written, selectors, labels, value).await? {
                filled += 1;
            }
        }

        filled += consent::check_consent_boxes(session, None).await?;

        tracing::debug!(filled, "BambooHR form filled");
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvfill_core::resume::{Basics, Location, Profile};

    #[test]
    fn postal_fields_come_from_resume_location() {
        let resume = ResumeDocument {
            basics: Basics {
                name: Some("Jan Nowak".to_string()),
                location: Some(Location {
                    address: Some("ul. Prosta 1".to_string()),
                    city: Some("Warszawa".to_string()),
                    region: Some("Mazowieckie".to_string()),
                    postal_code: Some("00-001".to_string()),
                    ..Location::default()
                }),
                ..Basics::default()
            },
            ..ResumeDocument::default()
        };
        let form = map_form(&resume, &FillOptions::default());
        assert_eq!(form.address, "ul. Prosta 1");
        assert_eq!(form.city, "Warszawa");
        assert_eq!(form.state, "Mazowieckie");
        assert_eq!(form.zip, "00-001");
    }

    #[test]
    fn website_falls_back_to_portfolio_profile() {
        let resume = ResumeDocument {
            basics: Basics {
                profiles: vec![Profile {
                    network: Some("Portfolio".to_string()),
                    url: Some("https://jan.dev".to_string()),
                }],
                ..Basics::default()
            },
            ..ResumeDocument::default()
        };
        let form = map_form(&resume, &FillOptions::default());
        assert_eq!(form.website_url, "https://jan.dev");
    }

    #[test]
    fn careers_and_jobs_paths_match_on_bamboohr_host() {
        let site = BambooHr;
        assert!(site.matches_location(&PageLocation::parse(
            "https://acme.bamboohr.com/careers/42"
        )));
        assert!(site.matches_location(&PageLocation::parse("https://acme.bamboohr.com/jobs/42")));
        assert!(!site.matches_location(&PageLocation::parse("https://acme.bamboohr.com/home")));
        assert!(!site.matches_location(&PageLocation::parse("https://example.com/careers/42")));
    }
}
