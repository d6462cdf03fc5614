//! Traffit public application forms (`*.traffit.com`).
//!
//! Fields carry `data-sid` attributes with label text as the fallback.
//! Salary goes in with a ` PLN netto` suffix, employment type is a radio
//! pair, and the form gates submission on all of its consent clauses, so
//! every checkbox is ticked.

use std::collections::HashSet;

use async_trait::async_trait;

use cvfill_core::{FillOptions, ResumeDocument};
use cvfill_driver::{PageLocation, Session};

use crate::consent;
use crate::error::FillError;
use crate::fields::{fill_chain, select_native_option};
use crate::sites::SiteIntegration;

const AVAILABILITY_SELECT: &str = "select[name*=\"7489\"]";
const RADIO_B2B: &str = "input[type=\"radio\"][id*=\"7491_0\"]";
const RADIO_UOP: &str = "input[type=\"radio\"][id*=\"7491_1\"]";
const AVAILABILITY_OPTIONS: [&str; 3] = ["immediately", "natychmiast", "asap"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraffitForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin_url: String,
    pub location: String,
    pub availability: String,
    /// Salary with the ` PLN netto` suffix already applied, or empty.
    pub salary: String,
    pub employment_type: String,
    pub about: String,
}

#[must_use]
pub fn map_form(resume: &ResumeDocument, options: &FillOptions) -> TraffitForm {
    let location = resume
        .basics
        .location
        .as_ref()
        .and_then(|l| l.city.clone().or_else(|| l.region.clone()))
        .or_else(|| options.location.clone())
        .unwrap_or_else(|| "Warszawa".to_string());
    let salary = options
        .expected_salary
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| format!("{s} PLN netto"))
        .unwrap_or_default();
    TraffitForm {
        first_name: resume.first_name(),
        last_name: resume.last_name(),
        email: resume.basics.email.clone().unwrap_or_default(),
        phone: resume.basics.phone.clone().unwrap_or_default(),
        linkedin_url: resume
            .profile_url(&["linkedin"])
            .unwrap_or_default()
            .to_string(),
        location,
        availability: options
            .availability_date
            .clone()
            .unwrap_or_else(|| "Natychmiast".to_string()),
        salary,
        employment_type: options
            .employment_type
            .clone()
            .unwrap_or_else(|| "B2B".to_string()),
        about: resume
            .basics
            .summary
            .clone()
            .or_else(|| options.cover_letter.clone())
            .unwrap_or_default(),
    }
}

pub struct Traffit;

#[async_trait]
impl SiteIntegration for Traffit {
    fn name(&self) -> &'static str {
        "Traffit"
    }

    fn matches_location(&self, location: &PageLocation) -> bool {
        location.host_matches("traffit.com")
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
        let form = map_form(resume, options);
        let mut written = HashSet::new();
        let mut filled = 0;

        let text_fields: [(&[&str], &[&str], &str); 7] = [
            (
                &["[data-sid=\"firstName\"]"],
                &["imię", "first name"],
                &form.first_name,
            ),
            (
                &["[data-sid=\"lastName\"]"],
                &["nazwisko", "last name", "surname"],
                &form.last_name,
            ),
            (&["[data-sid=\"email\"]"], &["e-mail", "email"], &form.email),
            (
                &["[data-sid=\"mobile\"]"],
                &["telefon", "phone", "mobile"],
                &form.phone,
            ),
            (
                &[
                    "[data-sid=\"linkedin\"]",
                    "[data-sid=\"linkedIn\"]",
                    "[data-sid=\"linkedin_url\"]",
                ],
                &["linkedin"],
                &form.linkedin_url,
            ),
            (
                &["[data-sid=\"location\"]", "[data-sid=\"city\"]"],
                &["lokalizacja", "miasto", "city", "location"],
                &form.location,
            ),
            (
                &["[data-sid=\"candidate_about\"]"],
                &["chcesz nam coś więcej", "wiadomość", "message"],
                &form.about,
            ),
        ];
        for (selectors, labels, value) in text_fields {
            if fill_chain(session, &mut written, selectors, labels, value).await? {
                filled += 1;
            }
        }

        // Availability is a dropdown on some postings and a text input on
        // others.
        if let Some(select) = session.find(AVAILABILITY_SELECT).await? {
            for wanted in AVAILABILITY_OPTIONS {
                if select_native_option(session, &select, wanted).await? {
                    filled += 1;
                    break;
                }
            }
        } else if fill_chain(
            session,
            &mut written,
            &[
                "[data-sid=\"availability\"]",
                "[data-sid=\"available_from\"]",
                "[data-sid=\"start_date\"]",
            ],
            &["dostępność", "availability", "od kiedy", "okres wypowiedzenia"],
            &form.availability,
        )
        .await?
        {
            filled += 1;
        }

        if fill_chain(
            session,
            &mut written,
            &[
                "[data-sid=\"salary\"]",
                "[data-sid=\"salary_expectations\"]",
                "[data-sid=\"expected_salary\"]",
            ],
            &["wynagrodzenie", "salary", "oczekiwania finansowe", "stawka"],
            &form.salary,
        )
        .await?
        {
            filled += 1;
        }

        let radio = if form.employment_type.eq_ignore_ascii_case("b2b") {
            session.find(RADIO_B2B).await?
        } else {
            session.find(RADIO_UOP).await?
        };
        if let Some(radio) = radio {
            session.click(&radio).await?;
            filled += 1;
        }

        filled += consent::check_all_boxes(session, Some("form")).await?;

        tracing::debug!(filled, "Traffit form filled");
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvfill_core::resume::{Basics, Location};

    fn resume() -> ResumeDocument {
        ResumeDocument {
            basics: Basics {
                name: Some("Anna Maria Kowalska".to_string()),
                email: Some("anna@example.com".to_string()),
                location: Some(Location {
                    city: Some("Kraków".to_string()),
                    ..Location::default()
                }),
                ..Basics::default()
            },
            ..ResumeDocument::default()
        }
    }

    #[test]
    fn splits_name_and_prefers_resume_city() {
        let form = map_form(&resume(), &FillOptions::default());
        assert_eq!(form.first_name, "Anna");
        assert_eq!(form.last_name, "Maria Kowalska");
        assert_eq!(form.location, "Kraków");
    }

    #[test]
    fn salary_gets_currency_suffix_only_when_present() {
        let with = map_form(
            &resume(),
            &FillOptions {
                expected_salary: Some("20000".to_string()),
                ..FillOptions::default()
            },
        );
        assert_eq!(with.salary, "20000 PLN netto");

        let without = map_form(&resume(), &FillOptions::default());
        assert!(without.salary.is_empty());
    }

    #[test]
    fn falls_back_to_option_location_then_default() {
        let bare = ResumeDocument::default();
        let from_option = map_form(
            &bare,
            &FillOptions {
                location: Some("Gdańsk".to_string()),
                ..FillOptions::default()
            },
        );
        assert_eq!(from_option.location, "Gdańsk");

        let default = map_form(&bare, &FillOptions::default());
        assert_eq!(default.location, "Warszawa");
    }

    #[test]
    fn location_requires_traffit_host() {
        let site = Traffit;
        assert!(site.matches_location(&PageLocation::parse(
            "https://acme.traffit.com/career/offer/1"
        )));
        assert!(!site.matches_location(&PageLocation::parse("https://example.com/form")));
    }
}
